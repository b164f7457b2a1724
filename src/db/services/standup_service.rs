use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, UpdateResult,
};
use serde::{Deserialize, Serialize};

use crate::db::entities::{prelude::Standup, standup};

/// Editable standup settings, as submitted by the standup form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandupParams {
    pub title: String,
    pub subject_prefix: String,
    pub to_address: String,
    #[serde(default)]
    pub one_click_post: bool,
    pub closing_message: Option<String>,
    #[serde(default)]
    pub image_urls: String,
    #[serde(default)]
    pub image_days: String,
}

impl StandupParams {
    fn closing_message(&self) -> Option<String> {
        self.closing_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
    }
}

pub async fn create_standup<C: ConnectionTrait>(
    db: &C,
    params: StandupParams,
) -> Result<standup::Model, DbErr> {
    let now = Utc::now();
    let closing_message = params.closing_message();
    let new_standup = standup::ActiveModel {
        title: Set(params.title.trim().to_owned()),
        subject_prefix: Set(params.subject_prefix.trim().to_owned()),
        to_address: Set(params.to_address.trim().to_owned()),
        one_click_post: Set(params.one_click_post),
        closing_message: Set(closing_message),
        image_urls: Set(params.image_urls),
        image_days: Set(params.image_days),
        last_email_time: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_standup.insert(db).await
}

pub async fn get_all_standups<C: ConnectionTrait>(db: &C) -> Result<Vec<standup::Model>, DbErr> {
    Standup::find().order_by_asc(standup::Column::Title).all(db).await
}

pub async fn get_standup_by_id<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
) -> Result<Option<standup::Model>, DbErr> {
    Standup::find_by_id(standup_id).one(db).await
}

pub async fn update_standup<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
    params: StandupParams,
) -> Result<standup::Model, DbErr> {
    let existing = Standup::find_by_id(standup_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("standup {standup_id}")))?;

    let closing_message = params.closing_message();
    let mut active = existing.into_active_model();
    active.title = Set(params.title.trim().to_owned());
    active.subject_prefix = Set(params.subject_prefix.trim().to_owned());
    active.to_address = Set(params.to_address.trim().to_owned());
    active.one_click_post = Set(params.one_click_post);
    active.closing_message = Set(closing_message);
    active.image_urls = Set(params.image_urls);
    active.image_days = Set(params.image_days);
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

/// Stamps the time of the most recent standup email.
pub async fn record_email_sent<C: ConnectionTrait>(
    db: &C,
    standup_id: i32,
    sent_at: DateTime<Utc>,
) -> Result<UpdateResult, DbErr> {
    Standup::update_many()
        .col_expr(standup::Column::LastEmailTime, Expr::value(sent_at))
        .filter(standup::Column::Id.eq(standup_id))
        .exec(db)
        .await
}
