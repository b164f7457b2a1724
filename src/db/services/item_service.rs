use chrono::Utc;
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::db::entities::{item, prelude::Item};
use crate::db::enums::ItemKind;

/// Items of one kind, under their board header.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSection {
    pub kind: ItemKind,
    pub header: &'static str,
    pub items: Vec<item::Model>,
}

pub async fn create_item<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
    kind: ItemKind,
    title: &str,
    description: Option<&str>,
    author: Option<&str>,
) -> Result<item::Model, DbErr> {
    let new_item = item::ActiveModel {
        standup_id: Set(standup_id),
        post_id: Set(None),
        kind: Set(kind),
        title: Set(title.to_owned()),
        description: Set(description.map(str::to_owned)),
        author: Set(author.map(str::to_owned)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    new_item.insert(db).await
}

/// Items still on the board, i.e. not yet part of any post.
pub async fn get_board_items<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
) -> Result<Vec<item::Model>, DbErr> {
    Item::find()
        .filter(item::Column::StandupId.eq(standup_id))
        .filter(item::Column::PostId.is_null())
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
}

pub async fn get_items_for_post<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
) -> Result<Vec<item::Model>, DbErr> {
    Item::find()
        .filter(item::Column::PostId.eq(post_id))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
}

/// Moves every board item of the standup into the post. Returns the number of items moved.
pub async fn move_board_items_to_post<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
    post_id: i32,
) -> Result<u64, DbErr> {
    let result = Item::update_many()
        .col_expr(item::Column::PostId, Expr::value(post_id))
        .filter(item::Column::StandupId.eq(standup_id))
        .filter(item::Column::PostId.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes an item that is still on the board. Posted items are left alone.
pub async fn delete_board_item<C: ConnectionTrait>(
    db: &C,
    item_id: i32,
) -> Result<Option<item::Model>, DbErr> {
    let found = Item::find_by_id(item_id)
        .filter(item::Column::PostId.is_null())
        .one(db)
        .await?;

    match found {
        Some(model) => {
            model.clone().delete(db).await?;
            Ok(Some(model))
        }
        None => Ok(None),
    }
}

/// Groups items under every board section, in board order. Empty sections are kept.
pub fn group_by_kind(items: Vec<item::Model>) -> Vec<ItemSection> {
    let mut sections: Vec<ItemSection> = ItemKind::ALL
        .iter()
        .map(|kind| ItemSection {
            kind: *kind,
            header: kind.section_header(),
            items: Vec::new(),
        })
        .collect();

    for item in items {
        if let Some(section) = sections.iter_mut().find(|s| s.kind == item.kind) {
            section.items.push(item);
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, kind: ItemKind) -> item::Model {
        item::Model {
            id,
            standup_id: 1,
            post_id: None,
            kind,
            title: format!("item {id}"),
            description: None,
            author: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn groups_items_in_board_order() {
        let sections = group_by_kind(vec![
            item(1, ItemKind::Event),
            item(2, ItemKind::NewFace),
            item(3, ItemKind::Event),
        ]);

        let headers: Vec<&str> = sections.iter().map(|s| s.header).collect();
        assert_eq!(headers, ["NEW FACES", "HELPS", "INTERESTINGS", "EVENTS"]);
        assert_eq!(sections[0].items.len(), 1);
        assert!(sections[1].items.is_empty());
        let event_ids: Vec<i32> = sections[3].items.iter().map(|i| i.id).collect();
        assert_eq!(event_ids, [1, 3]);
    }
}
