use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager and the stores built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds and owns the lifecycle of the connection pool.
///
/// The pool is created once by the composition root and handed to the
/// stores that need it; nothing here is global.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Create a pool from config. Fails fast if the first connection cannot be made.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let mut options = PgConnectOptions::from_str(&connection_string)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!(
            "Created database pool for {} (max {} connections)",
            Self::redacted(&connection_string),
            config.max_connections
        );
        Ok(pool)
    }

    /// DATABASE_URL wins; otherwise assemble from host/port/user/password/name
    pub fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(base) = &config.url {
            let url = url::Url::parse(base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(url.into());
        }

        let user = config.user.as_deref().ok_or(DatabaseError::ConfigMissing("DB_USER"))?;
        let name = config.name.as_deref().ok_or(DatabaseError::ConfigMissing("DB_NAME"))?;

        let mut url = url::Url::parse("postgres://localhost").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_host(Some(config.host.as_str()))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_port(Some(config.port))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(user)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_password(config.password.as_deref())
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_path(&format!("/{}", name));
        Ok(url.into())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }

    /// Connection string with the password masked, for logs
    fn redacted(connection_string: &str) -> String {
        match url::Url::parse(connection_string) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }
}
