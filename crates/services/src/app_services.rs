use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::habit_service::HabitService;
use crate::log_service::HabitLogService;

/// Assembles the app-facing services over a shared storage backend.
#[derive(Clone)]
pub struct AppServices {
    habit_service: Arc<HabitService>,
    log_service: Arc<HabitLogService>,
    dashboard_service: Arc<DashboardService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(clock, &storage))
    }

    /// Build services over an already-constructed storage backend.
    ///
    /// Used by tests with `Storage::in_memory()`.
    #[must_use]
    pub fn with_storage(clock: Clock, storage: &Storage) -> Self {
        let habit_service = Arc::new(HabitService::new(clock, Arc::clone(&storage.habits)));
        let log_service = Arc::new(HabitLogService::new(
            clock,
            Arc::clone(&storage.habits),
            Arc::clone(&storage.habit_logs),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            clock,
            Arc::clone(&storage.habits),
            Arc::clone(&storage.habit_logs),
        ));

        Self {
            habit_service,
            log_service,
            dashboard_service,
        }
    }

    #[must_use]
    pub fn habit_service(&self) -> Arc<HabitService> {
        Arc::clone(&self.habit_service)
    }

    #[must_use]
    pub fn log_service(&self) -> Arc<HabitLogService> {
        Arc::clone(&self.log_service)
    }

    #[must_use]
    pub fn dashboard_service(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard_service)
    }
}
