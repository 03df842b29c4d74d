//! PostgreSQL implementation of the client traits.
//!
//! [`PostgresClient`] owns one `PgPool`. Each trait method is a single autocommit
//! statement run under the client's per-call deadline; nothing is batched or queued
//! above the pool.
//!
//! # Example
//! ```ignore
//! use tiodb::db::postgres::PostgresClient;
//! use tiodb::db::UserStore;
//!
//! let client = PostgresClient::connect(&url, &PoolSettings::default(), Duration::from_secs(30)).await?;
//! let alice = client.get_user("alice").await?;
//! ```

mod servers;
mod users;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Connection;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::PoolSettings;
use crate::db::client::{Backend, TioClient};
use crate::db::errors::{DbError, InitStage, Result};

/// PostgreSQL-backed client.
#[derive(Clone, Debug)]
pub struct PostgresClient {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresClient {
    pub const NAME: &'static str = "PostgreSQL";

    /// Open a pool against `connection_string` and confirm the server answers.
    ///
    /// The pool is created lazily so that a bad connection string (stage
    /// [`InitStage::Connect`]) is told apart from an unreachable server
    /// ([`InitStage::Ping`]).
    #[instrument(skip_all, fields(max_connections = settings.max_connections))]
    pub async fn connect(connection_string: &str, settings: &PoolSettings, query_timeout: Duration) -> Result<Self> {
        debug!(connection = %redact_connection_string(connection_string), "Opening PostgreSQL pool");

        let connect_failure = |source| DbError::InitializationFailure {
            stage: InitStage::Connect,
            source,
        };

        settings
            .validate()
            .map_err(|msg| connect_failure(sqlx::Error::Configuration(msg.into())))?;
        let options = PgConnectOptions::from_str(connection_string).map_err(connect_failure)?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout())
            .idle_timeout(settings.idle_timeout())
            .max_lifetime(settings.max_lifetime())
            .connect_lazy_with(options);

        let client = Self::from_pool(pool, query_timeout);
        if let Err(source) = client.ping_connection().await {
            client.pool.close().await;
            return Err(DbError::InitializationFailure {
                stage: InitStage::Ping,
                source,
            });
        }

        info!("Connected to PostgreSQL");
        Ok(client)
    }

    /// Wrap an already configured pool. No liveness check is made.
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    /// Get the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ping_connection(&self) -> std::result::Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await
    }

    /// Run one operation under the per-call deadline. On expiry the inner future is
    /// dropped, cancelling the call.
    pub(crate) async fn with_deadline<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.query_timeout, "Database operation timed out");
                Err(DbError::Timeout {
                    operation,
                    after: self.query_timeout,
                })
            }
        }
    }
}

#[async_trait]
impl TioClient for PostgresClient {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn identify(&self) -> &'static str {
        Self::NAME
    }

    async fn ping(&self) -> Result<()> {
        self.with_deadline("ping database", async { self.ping_connection().await.map_err(DbError::read("ping database")) })
            .await
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

/// Render a connection string for logs with any password masked.
///
/// Covers the userinfo password and a `password` query parameter. Anything that is
/// not a URL is not accepted by the driver either and is not echoed at all.
pub(crate) fn redact_connection_string(connection_string: &str) -> String {
    let Ok(mut url) = url::Url::parse(connection_string) else {
        return "<unparseable connection string>".to_string();
    };

    if url.password().is_some() {
        // Only fails for URLs that cannot carry credentials, which already had none.
        let _ = url.set_password(Some("***"));
    }

    if url.query_pairs().any(|(key, _)| key.eq_ignore_ascii_case("password")) {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key.eq_ignore_ascii_case("password") {
                    "***".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}
