//! Data access for the whiteboard tables.
//!
//! Each sub-module owns the queries for one entity. Functions that may run
//! inside a transaction are generic over `ConnectionTrait`.

pub mod item_service;
pub mod post_service;
pub mod standup_service;
pub mod user_service;

pub use item_service::*;
pub use post_service::*;
pub use standup_service::*;
pub use user_service::*;
