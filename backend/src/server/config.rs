//! Application settings and the server configuration built from them.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use shareit::domain::{DecisionPolicy, ParseDecisionPolicyError};
use shareit::outbound::persistence::{DbPool, PoolConfig};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Failures turning raw settings into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("host must be an IP address, got {host}")]
    InvalidHost { host: String },
    #[error(transparent)]
    DecisionPolicy(#[from] ParseDecisionPolicyError),
}

/// Settings loaded from `SHAREIT_*` environment variables, configuration
/// files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHAREIT")]
pub struct AppSettings {
    /// Address to bind. Defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind. Defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// `strict` or `allow-reversal`.
    pub decision_policy: Option<String>,
    /// Do not apply embedded migrations at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Socket address assembled from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip = IpAddr::from_str(host).map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured decision policy, [`DecisionPolicy::Strict`] when unset.
    pub fn decision_policy(&self) -> Result<DecisionPolicy, SettingsError> {
        self.decision_policy
            .as_deref()
            .map_or(Ok(DecisionPolicy::default()), |raw| {
                DecisionPolicy::from_str(raw).map_err(SettingsError::from)
            })
    }

    /// Pool configuration when a database URL is present.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                ))
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) decision_policy: DecisionPolicy,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, decision_policy: DecisionPolicy) -> Self {
        Self {
            bind_addr,
            decision_policy,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool. Without one the server runs over
    /// the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
