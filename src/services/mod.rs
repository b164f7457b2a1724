pub mod auth_service;
pub mod post_workflow;
