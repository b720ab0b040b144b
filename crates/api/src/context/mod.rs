//! Application context - dependency injection container

use std::sync::Arc;

use slotwise_core::{
    AvailabilityService, BookingCoordinator, Clock, EventRepository, EventTypeRegistry,
    OwnerLocks, PolicyStore, SlotGenerator, SystemClock,
};
use slotwise_domain::{Config, Result, StorageBackend};
use slotwise_infra::notifications::notifier_from_config;
use slotwise_infra::{
    DbManager, InMemoryEventRepository, InMemoryEventTypeRegistry, InMemoryPolicyStore,
    SqliteEventRepository, SqliteEventTypeRegistry, SqlitePolicyStore,
};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// The three storage ports, backed by one adapter family.
struct Stores {
    policies: Arc<dyn PolicyStore>,
    event_types: Arc<dyn EventTypeRegistry>,
    events: Arc<dyn EventRepository>,
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    /// `None` for the in-memory backend.
    pub db: Option<Arc<DbManager>>,
    pub availability: Arc<AvailabilityService>,
    pub slots: Arc<SlotGenerator>,
    pub bookings: Arc<BookingCoordinator>,
    pub owner_locks: Option<Arc<OwnerLocks>>,
}

impl AppContext {
    /// Builds the context with the system clock.
    ///
    /// For the SQLite backend this opens the pool and applies migrations.
    pub fn new_with_config(config: Config) -> Result<Self> {
        Self::new_with_clock(config, Arc::new(SystemClock))
    }

    pub fn new_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let (stores, db) = match config.database.backend {
            StorageBackend::Sqlite => {
                let db = Arc::new(DbManager::from_config(&config.database)?);
                db.run_migrations()?;
                info!(path = %db.path().display(), "sqlite storage ready");
                (sqlite_stores(&db), Some(db))
            }
            StorageBackend::Memory => {
                warn!("in-memory storage: bookings are lost on restart and not shared between processes");
                (memory_stores(), None)
            }
        };

        let owner_locks = config.booking.owner_locks.then(|| Arc::new(OwnerLocks::new()));
        let notifier = notifier_from_config(&config.notifications)?;

        let mut coordinator = BookingCoordinator::new(
            Arc::clone(&stores.policies),
            Arc::clone(&stores.event_types),
            Arc::clone(&stores.events),
            clock,
        )
        .with_notifier(notifier);
        if let Some(locks) = &owner_locks {
            coordinator = coordinator.with_owner_locks(Arc::clone(locks));
        }

        let slots = SlotGenerator::new(
            Arc::clone(&stores.policies),
            Arc::clone(&stores.event_types),
            Arc::clone(&stores.events),
        );
        let availability = AvailabilityService::new(stores.policies, stores.event_types);

        info!(
            backend = %config.database.backend,
            owner_locks = owner_locks.is_some(),
            webhook = config.notifications.webhook_url.is_some(),
            "application context initialised"
        );

        Ok(Self {
            config,
            db,
            availability: Arc::new(availability),
            slots: Arc::new(slots),
            bookings: Arc::new(coordinator),
            owner_locks,
        })
    }

    pub async fn health_check(&self) -> HealthStatus {
        HealthStatus::from_components(vec![self.check_storage_health().await])
    }

    async fn check_storage_health(&self) -> ComponentHealth {
        let Some(db) = self.db.clone() else {
            return ComponentHealth::healthy("storage", "memory");
        };

        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("storage", "sqlite"),
            Ok(Err(err)) => ComponentHealth::failing("storage", err.to_string()),
            Err(err) => ComponentHealth::failing("storage", format!("health check task failed: {err}")),
        }
    }
}

fn sqlite_stores(db: &Arc<DbManager>) -> Stores {
    Stores {
        policies: Arc::new(SqlitePolicyStore::new(Arc::clone(db))),
        event_types: Arc::new(SqliteEventTypeRegistry::new(Arc::clone(db))),
        events: Arc::new(SqliteEventRepository::new(Arc::clone(db))),
    }
}

fn memory_stores() -> Stores {
    Stores {
        policies: Arc::new(InMemoryPolicyStore::new()),
        event_types: Arc::new(InMemoryEventTypeRegistry::new()),
        events: Arc::new(InMemoryEventRepository::new()),
    }
}
