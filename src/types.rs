pub use crate::utils::database;
use async_trait::async_trait;
use std::{env, path::PathBuf};

#[derive(Clone, Debug)]
pub struct AppContext {
    pub host: String,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct StorageContext {
    pub upload_dir: PathBuf,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub storage: StorageContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 4u32)?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8000u16)?;
        let url = lookup("URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        let upload_dir = lookup("UPLOAD_DIR").unwrap_or_else(|| "public/uploads".to_string());

        Ok(Self {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            app: AppConfig { host, port, url },
            storage: StorageConfig {
                upload_dir: PathBuf::from(upload_dir),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("failed to migrate the database: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, ContextError>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, ContextError> {
        let db_conn =
            database::connect(self.database.url.as_str(), self.database.max_connections).await?;
        database::migrate(&db_conn).await?;

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            storage: StorageContext {
                upload_dir: self.storage.upload_dir,
            },
        })
    }
}
