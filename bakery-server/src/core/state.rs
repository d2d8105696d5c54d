use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::CaptchaStore;
use crate::utils::AppError;

/// Shared server state, held by every handler.
///
/// Cloning is cheap: the database handle and the services are shared
/// references.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Bounded in-memory captcha store
    pub captcha: Arc<CaptchaStore>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        captcha: Arc<CaptchaStore>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            captcha,
        }
    }

    /// Initialize the server state:
    ///
    /// 1. ensure the work directory exists
    /// 2. open the embedded database and apply schema definitions
    /// 3. wire up services (JWT, captcha)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = db_dir.join("bakery.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let captcha = Arc::new(CaptchaStore::new());

        Ok(Self::new(config.clone(), db_service.db, jwt_service, captcha))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
