use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::db::entities::{prelude::User, user};

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password_hash: &str,
) -> Result<user::Model, DbErr> {
    let new_user = user::ActiveModel {
        username: Set(username.to_owned()),
        password_hash: Set(password_hash.to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    new_user.insert(db).await
}

pub async fn get_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}
