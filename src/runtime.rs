//! Reusable member-service runtime.
//!
//! Provides [`ServiceHandle`] that wires configuration, storage,
//! credential hashing and notification into the use-case services, so the
//! CLI (or any transport adapter) does not duplicate bootstrap code.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::application::{MemberFinder, MemberService};
use crate::config::AppConfig;
use crate::domain::{MemberRepository, Notifier};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, BcryptPasswordHasher, DatabaseConfig, DisabledNotifier, InMemoryMemberRepository,
    LogNotifier, SeaOrmMemberRepository,
};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the member service.
pub struct ServiceOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServiceHandle ──────────────────────────────────────────────────

/// Handle to a wired member service.
///
/// # Examples
///
/// ```rust,no_run
/// use member_service::runtime::{ServiceHandle, ServiceOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServiceHandle::start(ServiceOptions::default()).await?;
///     let _member = handle.finder.find_by_email("a@b.com").await;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServiceHandle {
    /// Write-side use cases.
    pub members: Arc<MemberService>,
    /// Read-only lookups.
    pub finder: Arc<MemberFinder>,
    /// The configuration the service was started with.
    pub config: AppConfig,

    db: Option<DatabaseConnection>,
}

impl ServiceHandle {
    /// Start the member service with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations (unless `database.url = "memory"`)
    /// 2. Build the bcrypt hasher and the notifier from config
    /// 3. Wire `MemberService` and `MemberFinder`
    pub async fn start(opts: ServiceOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting member service...");

        let mut db = None;
        let repo: Arc<dyn MemberRepository> = if app_cfg.uses_memory_store() {
            info!("Using in-memory member repository");
            Arc::new(InMemoryMemberRepository::new())
        } else {
            let db_config = DatabaseConfig {
                url: app_cfg.database.url.clone(),
            };
            let conn = init_database(&db_config).await?;

            if opts.auto_migrate {
                info!("Running database migrations...");
                Migrator::up(&conn, None).await?;
                info!("Migrations completed");
            }

            db = Some(conn.clone());
            Arc::new(SeaOrmMemberRepository::new(conn))
        };

        let hasher = Arc::new(BcryptPasswordHasher::new(app_cfg.security.bcrypt_cost));
        info!(cost = hasher.cost(), "Password hasher configured");

        let notifier: Arc<dyn Notifier> = if app_cfg.notifications.enabled {
            Arc::new(LogNotifier::new(app_cfg.notifications.sender.clone()))
        } else {
            info!("Notifications disabled");
            Arc::new(DisabledNotifier)
        };

        let members = Arc::new(
            MemberService::new(repo.clone(), hasher, notifier)
                .with_welcome_subject(app_cfg.notifications.welcome_subject.clone()),
        );
        let finder = Arc::new(MemberFinder::new(repo));

        info!("Member service ready");

        Ok(Self {
            members,
            finder,
            config: app_cfg,
            db,
        })
    }

    /// Close the database pool, if one was opened.
    pub async fn shutdown(self) {
        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                tracing::warn!("Error closing database: {}", e);
            }
        }
        info!("Member service stopped");
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServiceHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
