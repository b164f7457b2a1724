pub mod db;
pub mod mailer;
pub mod presenters;
pub mod server;
pub mod services;
pub mod templates;
pub mod web;
