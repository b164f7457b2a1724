pub mod auth_routes;
pub mod item_routes;
pub mod post_routes;
pub mod standup_routes;
