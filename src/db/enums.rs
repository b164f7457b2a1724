use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whiteboard section an item is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ItemKind {
    #[sea_orm(string_value = "New face")]
    #[serde(rename = "New face")]
    NewFace,
    #[sea_orm(string_value = "Help")]
    Help,
    #[sea_orm(string_value = "Interesting")]
    Interesting,
    #[sea_orm(string_value = "Event")]
    Event,
}

impl ItemKind {
    /// Board order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::NewFace,
        ItemKind::Help,
        ItemKind::Interesting,
        ItemKind::Event,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::NewFace => "New face",
            ItemKind::Help => "Help",
            ItemKind::Interesting => "Interesting",
            ItemKind::Event => "Event",
        }
    }

    pub fn section_header(&self) -> &'static str {
        match self {
            ItemKind::NewFace => "NEW FACES",
            ItemKind::Help => "HELPS",
            ItemKind::Interesting => "INTERESTINGS",
            ItemKind::Event => "EVENTS",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
