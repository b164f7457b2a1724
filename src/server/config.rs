use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub log_dir: String,
    /// HTTP mail relay. Emails are only logged when unset.
    pub mail_relay_url: Option<String>,
    pub mail_from: String,
    pub cookie_secure: bool,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
pub struct PartialServerConfig {
    pub listen_addr: Option<String>,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub log_dir: Option<String>,
    pub mail_relay_url: Option<String>,
    pub mail_from: Option<String>,
    pub cookie_secure: Option<bool>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://whiteboard.db?mode=rwc".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_mail_from() -> String {
    "standup@example.com".to_string()
}

impl ServerConfig {
    /// Loads the optional TOML file, then the environment. Environment values win.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let file_config = match config_path {
            Some(path) => Self::load_file(Path::new(path))?,
            None => PartialServerConfig::default(),
        };
        let env_config = envy::from_env::<PartialServerConfig>()?;

        Self::merge(file_config, env_config)
    }

    /// A missing file yields an empty layer.
    pub fn load_file(path: &Path) -> Result<PartialServerConfig, ConfigError> {
        if !path.exists() {
            return Ok(PartialServerConfig::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn merge(file: PartialServerConfig, env: PartialServerConfig) -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            listen_addr: env.listen_addr.or(file.listen_addr).unwrap_or_else(default_listen_addr),
            database_url: env
                .database_url
                .or(file.database_url)
                .unwrap_or_else(default_database_url),
            jwt_secret: env
                .jwt_secret
                .or(file.jwt_secret)
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            log_dir: env.log_dir.or(file.log_dir).unwrap_or_else(default_log_dir),
            mail_relay_url: env.mail_relay_url.or(file.mail_relay_url),
            mail_from: env.mail_from.or(file.mail_from).unwrap_or_else(default_mail_from),
            cookie_secure: env.cookie_secure.or(file.cookie_secure).unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn environment_overrides_file() {
        let file = PartialServerConfig {
            listen_addr: Some("127.0.0.1:3000".to_string()),
            jwt_secret: Some("from-file".to_string()),
            mail_from: Some("file@example.com".to_string()),
            ..Default::default()
        };
        let env = PartialServerConfig {
            jwt_secret: Some("from-env".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(file, env).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.jwt_secret, "from-env");
        assert_eq!(config.mail_from, "file@example.com");
    }

    #[test]
    fn defaults_fill_missing_values() {
        let env = PartialServerConfig {
            jwt_secret: Some("secret".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::merge(PartialServerConfig::default(), env).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite://whiteboard.db?mode=rwc");
        assert_eq!(config.log_dir, "logs");
        assert!(config.mail_relay_url.is_none());
        assert!(!config.cookie_secure);
    }

    #[test]
    fn jwt_secret_is_required() {
        let result = ServerConfig::merge(PartialServerConfig::default(), PartialServerConfig::default());
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_url = \"postgres://localhost/whiteboard\"\nmail_relay_url = \"http://relay.local/send\"\ncookie_secure = true"
        )
        .unwrap();

        let partial = ServerConfig::load_file(file.path()).unwrap();
        assert_eq!(partial.database_url.as_deref(), Some("postgres://localhost/whiteboard"));
        assert_eq!(partial.mail_relay_url.as_deref(), Some("http://relay.local/send"));
        assert_eq!(partial.cookie_secure, Some(true));
    }

    #[test]
    fn missing_file_is_an_empty_layer() {
        let partial = ServerConfig::load_file(Path::new("/nonexistent/whiteboard.toml")).unwrap();
        assert!(partial.jwt_secret.is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen_addr = ").unwrap();

        assert!(matches!(
            ServerConfig::load_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
