use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub standup_id: i32,
    /// Subject line typed by the host, without the standup prefix.
    pub title: String,
    /// Host or blogger names.
    pub sender: String,
    pub sent_at: Option<ChronoDateTimeUtc>,
    pub archived: bool,
    pub created_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }
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
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::standup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Standup.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
