use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "standups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub subject_prefix: String,
    pub to_address: String,
    pub one_click_post: bool,
    pub closing_message: Option<String>,
    // Newline-delimited
    #[sea_orm(column_type = "Text")]
    pub image_urls: String,
    // Comma-delimited weekday names
    pub image_days: String,
    pub last_email_time: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn image_day_list(&self) -> Vec<&str> {
        self.image_days
            .split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
