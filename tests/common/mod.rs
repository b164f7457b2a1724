//! Shared harness for the HTTP-level tests.
//!
//! Every test gets its own SQLite file in a temp dir, a logged-in user and a
//! mail sender that records instead of delivering.

#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

use whiteboard::db::entities::standup;
use whiteboard::db::enums::ItemKind;
use whiteboard::db::schema::ensure_schema;
use whiteboard::db::services::{self, StandupParams};
use whiteboard::mailer::{MailMessage, MailSender, SenderError};
use whiteboard::presenters::FixedClock;
use whiteboard::server::config::ServerConfig;
use whiteboard::services::auth_service;
use whiteboard::templates::load_templates;
use whiteboard::web::create_axum_router;

pub const JWT_SECRET: &str = "test-secret";
pub const USERNAME: &str = "arthur";
pub const PASSWORD: &str = "excalibur";

// =============================================================================
// MAIL
// =============================================================================

#[derive(Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<MailMessage>>,
    fail: AtomicBool,
}

impl RecordingMailSender {
    pub fn fail_next_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SenderError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SenderError::SendFailed("relay unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// =============================================================================
// APP
// =============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers[header::LOCATION].to_str().unwrap()
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect()
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingMailSender>,
    pub token: String,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("whiteboard.db").display());
        let mut options = ConnectOptions::new(url);
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        ensure_schema(&db).await.unwrap();

        let user = auth_service::register_user(&db, USERNAME, PASSWORD).await.unwrap();
        let token = auth_service::create_jwt_for_user(&user, JWT_SECRET).unwrap();

        let mailer = Arc::new(RecordingMailSender::default());
        // A Monday: no Floor Friday, no image unless the standup asks for Mondays.
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2013, 9, 2).unwrap());
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            log_dir: dir.path().display().to_string(),
            mail_relay_url: None,
            mail_from: "standup@example.com".to_string(),
            cookie_secure: false,
        };

        let router = create_axum_router(
            db.clone(),
            Arc::new(load_templates().unwrap()),
            mailer.clone(),
            Arc::new(clock),
            Arc::new(config),
        );

        TestApp {
            router,
            db,
            mailer,
            token,
            _dir: dir,
        }
    }

    pub async fn create_standup(&self, title: &str, one_click_post: bool) -> standup::Model {
        let params = StandupParams {
            title: title.to_string(),
            subject_prefix: "[Standup][CO]".to_string(),
            to_address: "camelot@example.com".to_string(),
            one_click_post,
            ..Default::default()
        };
        services::create_standup(&self.db, params).await.unwrap()
    }

    pub async fn add_item(&self, standup_id: i32, kind: ItemKind, title: &str) {
        services::create_item(&self.db, standup_id, kind, title, None, Some("Lancelot"))
            .await
            .unwrap();
    }

    fn auth_cookie(&self, flash: Option<&str>) -> String {
        match flash {
            Some(flash) => format!("token={}; flash={}", self.token, flash),
            None => format!("token={}", self.token),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_with_flash(path, None).await
    }

    pub async fn get_with_flash(&self, path: &str, flash: Option<&str>) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .header(header::COOKIE, self.auth_cookie(flash))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::COOKIE, self.auth_cookie(None))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }
}
