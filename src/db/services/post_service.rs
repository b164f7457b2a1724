use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{post, prelude::Post};

pub async fn insert_post<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
    title: &str,
    sender: &str,
) -> Result<post::Model, DbErr> {
    let new_post = post::ActiveModel {
        standup_id: Set(standup_id),
        title: Set(title.to_owned()),
        sender: Set(sender.to_owned()),
        sent_at: Set(None),
        archived: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    new_post.insert(db).await
}

pub async fn get_post_by_id<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
) -> Result<Option<post::Model>, DbErr> {
    Post::find_by_id(post_id).one(db).await
}

pub async fn mark_post_sent<C: ConnectionTrait>(
    db: &C,
    post: post::Model,
    sent_at: DateTime<Utc>,
) -> Result<post::Model, DbErr> {
    let mut active = post.into_active_model();
    active.sent_at = Set(Some(sent_at));
    active.update(db).await
}

pub async fn mark_post_archived<C: ConnectionTrait>(
    db: &C,
    post: post::Model,
) -> Result<post::Model, DbErr> {
    let mut active = post.into_active_model();
    active.archived = Set(true);
    active.update(db).await
}

/// Archived posts of a standup, newest first.
pub async fn get_archived_posts<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
) -> Result<Vec<post::Model>, DbErr> {
    Post::find()
        .filter(post::Column::StandupId.eq(standup_id))
        .filter(post::Column::Archived.eq(true))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
        .all(db)
        .await
}

/// Posts created from the board but not yet archived, newest first.
pub async fn get_pending_posts<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
) -> Result<Vec<post::Model>, DbErr> {
    Post::find()
        .filter(post::Column::StandupId.eq(standup_id))
        .filter(post::Column::Archived.eq(false))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
        .all(db)
        .await
}
