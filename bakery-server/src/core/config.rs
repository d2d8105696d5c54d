use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Which product price a sale line item snapshots.
///
/// Historically every sale line recorded the production cost; some
/// deployments want the marked-up sale price instead. This is an explicit
/// policy knob rather than a silent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSource {
    /// Snapshot the production cost (historical behaviour)
    #[default]
    Cost,
    /// Snapshot the marked-up sale price
    Sale,
}

impl PriceSource {
    fn from_env() -> Self {
        match std::env::var("PRICE_SOURCE").as_deref() {
            Ok("sale") | Ok("sale_price") => PriceSource::Sale,
            _ => PriceSource::Cost,
        }
    }

    /// Product field read inside the sale transaction
    pub fn product_field(&self) -> &'static str {
        match self {
            PriceSource::Cost => "cost",
            PriceSource::Sale => "sale_price",
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | HTTP_PORT | 4000 | HTTP service port |
/// | ENVIRONMENT | development | runtime environment |
/// | PRICE_SOURCE | cost | sale line price snapshot policy |
/// | JWT_SECRET | (generated in dev) | HS256 signing secret, >= 32 bytes |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory; the database lives under `<work_dir>/database`
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Sale line price snapshot policy
    pub price_source: PriceSource,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            price_source: PriceSource::from_env(),
        }
    }

    /// Override work dir and port on top of the environment defaults.
    ///
    /// Mostly used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the embedded database files
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
