mod habit;
mod habit_log;
mod ids;

pub use habit::{Habit, HabitError};
pub use habit_log::HabitLog;
pub use ids::{HabitId, HabitLogId, ParseIdError};
