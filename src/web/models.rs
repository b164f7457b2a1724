use serde::{Deserialize, Serialize};

use crate::db::enums::ItemKind;

// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub user_id: i32,
    pub exp: usize,
}

/// Logged-in user, inserted as a request extension by the auth middleware.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub kind: ItemKind,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub sender: String,
    pub title: String,
}

/// Empty form fields arrive as `Some("")`.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
