use std::sync::Arc;

use chrono::NaiveDate;
use habit_core::model::{HabitId, HabitLog};
use storage::repository::{HabitLogRepository, HabitRepository, StorageError};

use crate::Clock;
use crate::error::HabitLogServiceError;

/// Orchestrates per-day completion saves against the current month.
#[derive(Clone)]
pub struct HabitLogService {
    clock: Clock,
    habits: Arc<dyn HabitRepository>,
    logs: Arc<dyn HabitLogRepository>,
}

impl HabitLogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        habits: Arc<dyn HabitRepository>,
        logs: Arc<dyn HabitLogRepository>,
    ) -> Self {
        Self {
            clock,
            habits,
            logs,
        }
    }

    /// Save the completion status of a habit for a day of the current
    /// month, updating the existing log if one exists.
    ///
    /// # Errors
    ///
    /// Returns `HabitLogServiceError::Storage` with
    /// `StorageError::NotFound` if the habit does not exist, and
    /// `HabitLogServiceError::InvalidDay` if `day` falls outside the
    /// current month.
    pub async fn upsert_log(
        &self,
        habit_id: HabitId,
        day: u32,
        status: bool,
    ) -> Result<HabitLog, HabitLogServiceError> {
        if self.habits.get_habit(habit_id).await?.is_none() {
            return Err(StorageError::NotFound.into());
        }

        let today = self.clock.today();
        // from_ymd_opt rejects day 0 and days past the month's end.
        let Some(log_date) = NaiveDate::from_ymd_opt(today.year, today.month, day) else {
            return Err(HabitLogServiceError::InvalidDay {
                day,
                days_in_month: today.days_in_month,
            });
        };

        let log = self.logs.upsert_log(habit_id, log_date, status).await?;
        Ok(log)
    }

    /// All logs recorded for the given year/month.
    ///
    /// # Errors
    ///
    /// Returns `HabitLogServiceError::Storage` if repository access fails.
    pub async fn logs_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<HabitLog>, HabitLogServiceError> {
        let logs = self.logs.logs_for_month(year, month).await?;
        Ok(logs)
    }
}
