//! Pure aggregation of per-day completion logs into dashboard statistics.
//!
//! Everything here is a deterministic function of the habit list, the
//! current month's logs, and the calendar coordinates of today. No I/O,
//! no clock reads, no failure paths.

use std::collections::HashMap;

use crate::model::{Habit, HabitId, HabitLog};
use crate::time::Today;

/// Fast lookup from `(habit_id, day-of-month)` to completion status.
pub type LogMap = HashMap<(HabitId, u32), bool>;

/// Builds the `(habit_id, day)` → status map from a month's logs.
///
/// The store guarantees at most one log per `(habit_id, day)`. If the
/// input nevertheless holds duplicates, the last entry in iteration
/// order wins.
#[must_use]
pub fn build_log_map(logs: &[HabitLog]) -> LogMap {
    let mut map = LogMap::with_capacity(logs.len());
    for log in logs {
        map.insert((log.habit_id(), log.day_of_month()), log.status());
    }
    map
}

/// Re-keys the log map as `"{habit_id}_{day}"` strings for JSON
/// transport. Representation only; no values change.
#[must_use]
pub fn log_map_keys(log_map: &LogMap) -> HashMap<String, bool> {
    log_map
        .iter()
        .map(|(&(habit_id, day), &status)| (format!("{habit_id}_{day}"), status))
        .collect()
}

/// Aggregated completion statistics over days 1..=today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStats {
    /// Habits whose log for today is `true`. Missing logs count as not
    /// completed.
    pub completed_today: usize,
    /// Percentage of habits completed today, floor-truncated.
    pub today_progress: u32,
    /// Percentage of possible completions logged `true` over days
    /// 1..=today, floor-truncated.
    pub monthly_progress: u32,
    /// Per-day completion percentage, index 0 = day 1, length = today's
    /// day of month.
    pub daily_progress: Vec<u32>,
}

/// Computes all dashboard statistics for the current month.
///
/// Percentages use integer (floor) division throughout. With zero
/// habits every percentage is 0 and `daily_progress` is all zeroes.
/// Logs dated after today are excluded from the monthly numerator while
/// the denominator stays `habits × today.day`.
#[must_use]
pub fn aggregate(habits: &[Habit], log_map: &LogMap, today: Today) -> ProgressStats {
    let habit_count = habits.len();

    let completed_today = habits
        .iter()
        .filter(|h| is_done(log_map, h.id(), today.day))
        .count();

    let total_done = log_map
        .iter()
        .filter(|&(&(_, day), &status)| status && day <= today.day)
        .count();
    let total_possible = habit_count * today.day as usize;
    let monthly_progress = percentage(total_done, total_possible);

    let today_progress = percentage(completed_today, habit_count);

    let daily_progress = (1..=today.day)
        .map(|day| {
            let done = habits
                .iter()
                .filter(|h| is_done(log_map, h.id(), day))
                .count();
            percentage(done, habit_count)
        })
        .collect();

    ProgressStats {
        completed_today,
        today_progress,
        monthly_progress,
        daily_progress,
    }
}

fn is_done(log_map: &LogMap, habit_id: HabitId, day: u32) -> bool {
    log_map.get(&(habit_id, day)).copied().unwrap_or(false)
}

/// Floor-truncated percentage; 0 when nothing is possible.
fn percentage(done: usize, possible: usize) -> u32 {
    if possible == 0 {
        return 0;
    }
    u32::try_from(100 * done / possible).unwrap_or(u32::MAX)
}
