use chrono::{Datelike, NaiveDate};

use crate::model::ids::{HabitId, HabitLogId};

/// One day's completion record for a single habit.
///
/// The store keeps at most one log per `(habit_id, log_date)` pair; a
/// repeated save for the same day updates `status` in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitLog {
    id: HabitLogId,
    habit_id: HabitId,
    log_date: NaiveDate,
    status: bool,
}

impl HabitLog {
    #[must_use]
    pub fn new(id: HabitLogId, habit_id: HabitId, log_date: NaiveDate, status: bool) -> Self {
        Self {
            id,
            habit_id,
            log_date,
            status,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> HabitLogId {
        self.id
    }

    #[must_use]
    pub fn habit_id(&self) -> HabitId {
        self.habit_id
    }

    #[must_use]
    pub fn log_date(&self) -> NaiveDate {
        self.log_date
    }

    /// Day-of-month component of `log_date` (1-based).
    #[must_use]
    pub fn day_of_month(&self) -> u32 {
        self.log_date.day()
    }

    #[must_use]
    pub fn status(&self) -> bool {
        self.status
    }
}
