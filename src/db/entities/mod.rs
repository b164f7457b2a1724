//! SeaORM entities for the whiteboard tables.

pub mod item;
pub mod post;
pub mod standup;
pub mod user;

pub mod prelude {
    pub use super::item::Entity as Item;
    pub use super::post::Entity as Post;
    pub use super::standup::Entity as Standup;
    pub use super::user::Entity as User;
}
