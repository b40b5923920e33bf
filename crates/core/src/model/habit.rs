use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::HabitId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HabitError {
    #[error("habit name cannot be empty")]
    EmptyName,
}

/// A named recurring activity tracked with one checkbox per day.
///
/// The stored name is always the trimmed form, so two names that differ
/// only in surrounding whitespace refer to the same habit.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    id: HabitId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Habit {
    /// Creates a new Habit.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::EmptyName` if the name is empty or whitespace-only.
    pub fn new(
        id: HabitId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, HabitError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HabitError::EmptyName);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> HabitId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn habit_new_rejects_empty_name() {
        let err = Habit::new(HabitId::new(1), "   ", fixed_now()).unwrap_err();
        assert_eq!(err, HabitError::EmptyName);
    }

    #[test]
    fn habit_new_happy_path() {
        let habit = Habit::new(HabitId::new(10), "Morning run", fixed_now()).unwrap();
        assert_eq!(habit.id(), HabitId::new(10));
        assert_eq!(habit.name(), "Morning run");
        assert_eq!(habit.created_at(), fixed_now());
    }

    #[test]
    fn habit_trims_name() {
        let habit = Habit::new(HabitId::new(1), "  Read  ", fixed_now()).unwrap();
        assert_eq!(habit.name(), "Read");
    }
}
