use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use habit_core::model::{Habit, HabitId};
use habit_core::progress;
use storage::repository::{HabitLogRepository, HabitRepository};

use crate::Clock;
use crate::error::DashboardError;

/// Habit fields exposed to the dashboard page and API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitView {
    pub id: HabitId,
    pub name: String,
}

impl HabitView {
    #[must_use]
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            id: habit.id(),
            name: habit.name().to_owned(),
        }
    }
}

/// Everything the dashboard renders in one fetch: the habit list, the
/// month's completion map keyed as `"{habit_id}_{day}"`, the aggregated
/// statistics, and today's calendar coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub habits: Vec<HabitView>,
    pub log_map: HashMap<String, bool>,
    pub completed_today: usize,
    pub today_progress: u32,
    pub monthly_progress: u32,
    pub daily_progress: Vec<u32>,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub days_in_month: u32,
}

/// Assembles the dashboard view model from stored habits and logs.
///
/// All aggregation is delegated to the pure functions in
/// `habit_core::progress`; this service only fetches and repackages.
#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    habits: Arc<dyn HabitRepository>,
    logs: Arc<dyn HabitLogRepository>,
}

impl DashboardService {
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

    /// Build the dashboard view for the current month.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if repository access fails.
    pub async fn dashboard(&self) -> Result<DashboardView, DashboardError> {
        let today = self.clock.today();
        let habits = self.habits.list_habits().await?;
        let logs = self.logs.logs_for_month(today.year, today.month).await?;

        let log_map = progress::build_log_map(&logs);
        let stats = progress::aggregate(&habits, &log_map, today);

        Ok(DashboardView {
            habits: habits.iter().map(HabitView::from_habit).collect(),
            log_map: progress::log_map_keys(&log_map),
            completed_today: stats.completed_today,
            today_progress: stats.today_progress,
            monthly_progress: stats.monthly_progress,
            daily_progress: stats.daily_progress,
            day: today.day,
            month: today.month,
            year: today.year,
            days_in_month: today.days_in_month,
        })
    }
}
