use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

use crate::mailer::SenderError;
use crate::services::post_workflow::PostError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Mail error: {0}")]
    MailError(String),
    #[error("Template error: {0}")]
    TemplateError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Pages are only reachable after login.
            AppError::InvalidCredentials | AppError::Unauthorized(_) => {
                return Redirect::to("/login").into_response();
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => {
                error!(error = %msg, "Database error while handling request.");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {msg}"))
            }
            AppError::MailError(msg) => {
                error!(error = %msg, "Mail delivery failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Could not send email: {msg}"))
            }
            AppError::TemplateError(msg) => {
                error!(error = %msg, "Template rendering failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {msg}"))
            }
            AppError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, message).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::TemplateError(format!("{err:?}"))
    }
}

impl From<SenderError> for AppError {
    fn from(err: SenderError) -> Self {
        AppError::MailError(err.to_string())
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::Db(e) => e.into(),
            PostError::StandupNotFound(id) => AppError::NotFound(format!("Standup {id} not found")),
            PostError::PostNotFound(id) => AppError::NotFound(format!("Post {id} not found")),
            PostError::AlreadySent(id) => {
                AppError::Conflict(format!("Post {id} has already been emailed"))
            }
            PostError::InvalidInput(msg) => AppError::InvalidInput(msg),
            PostError::Mail(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized("no token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn post_errors_map_to_statuses() {
        let conflict = AppError::from(PostError::AlreadySent(1)).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid =
            AppError::from(PostError::InvalidInput("Subject can't be blank".to_string())).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = AppError::from(PostError::PostNotFound(9)).into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
