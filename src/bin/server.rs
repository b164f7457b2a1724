use clap::Parser;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use whiteboard::db::schema::ensure_schema;
use whiteboard::mailer::senders::{log::LogMailSender, webhook::WebhookMailSender};
use whiteboard::mailer::MailSender;
use whiteboard::presenters::{Clock, SystemClock};
use whiteboard::server::config::ServerConfig;
use whiteboard::services::auth_service;
use whiteboard::templates::load_templates;
use whiteboard::web::create_axum_router;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Create a login with this username and exit
    #[arg(long, requires = "password")]
    create_user: Option<String>,

    /// Password for --create-user
    #[arg(long)]
    password: Option<String>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "whiteboard.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

fn build_mailer(config: &ServerConfig) -> Result<Arc<dyn MailSender>, Box<dyn std::error::Error + Send + Sync>> {
    match config.mail_relay_url.as_deref() {
        Some(url) => {
            info!(relay = %url, "Sending standup emails through mail relay.");
            Ok(Arc::new(WebhookMailSender::new(url)?))
        }
        None => {
            warn!("MAIL_RELAY_URL not set; standup emails will only be logged.");
            Ok(Arc::new(LogMailSender))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let server_config = Arc::new(ServerConfig::load(args.config.as_deref())?);
    init_logging(&server_config.log_dir);
    info!("Starting whiteboard server, version: {}", env!("CARGO_PKG_VERSION"));

    // --- Database Setup ---
    let mut opt = ConnectOptions::new(server_config.database_url.clone());
    opt.max_connections(10).sqlx_logging(false);
    let db_pool: DatabaseConnection = Database::connect(opt).await?;
    ensure_schema(&db_pool).await?;

    if let (Some(username), Some(password)) = (args.create_user.as_deref(), args.password.as_deref()) {
        let user = auth_service::register_user(&db_pool, username, password).await?;
        info!(user_id = user.id, username = %user.username, "Created user.");
        return Ok(());
    }

    let templates = Arc::new(load_templates()?);
    let mailer = build_mailer(&server_config)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let app = create_axum_router(
        db_pool,
        templates,
        mailer,
        clock,
        server_config.clone(),
    );

    let listener = tokio::net::TcpListener::bind(&server_config.listen_addr).await?;
    info!(address = %server_config.listen_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
