//! Shared error types for the services crate.

use thiserror::Error;

use habit_core::model::HabitError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `HabitService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HabitServiceError {
    #[error(transparent)]
    Habit(#[from] HabitError),
    #[error("a habit named \"{name}\" already exists")]
    DuplicateName { name: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `HabitLogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HabitLogServiceError {
    #[error("day {day} is not a valid day of the current month (1..={days_in_month})")]
    InvalidDay { day: u32, days_in_month: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
