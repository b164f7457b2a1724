use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::ItemKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub standup_id: i32,
    /// Null while the item is still on the board.
    pub post_id: Option<i32>,
    pub kind: ItemKind,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::standup::Entity",
        from = "Column::StandupId",
        to = "super::standup::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Standup,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "SetNull",
        on_update = "Cascade"
    )]
    Post,
}

impl Related<super::standup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Standup.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
