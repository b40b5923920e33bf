use std::sync::Arc;

use habit_core::model::{Habit, HabitId};
use storage::repository::{HabitRepository, NewHabitRecord};

use crate::Clock;
use crate::error::HabitServiceError;

/// Orchestrates habit creation, renaming, and deletion.
#[derive(Clone)]
pub struct HabitService {
    clock: Clock,
    habits: Arc<dyn HabitRepository>,
}

impl HabitService {
    #[must_use]
    pub fn new(clock: Clock, habits: Arc<dyn HabitRepository>) -> Self {
        Self { clock, habits }
    }

    /// List habits in creation order.
    ///
    /// # Errors
    ///
    /// Returns `HabitServiceError::Storage` if repository access fails.
    pub async fn list_habits(&self) -> Result<Vec<Habit>, HabitServiceError> {
        let habits = self.habits.list_habits().await?;
        Ok(habits)
    }

    /// Create a new habit with the given name and persist it.
    ///
    /// The name is trimmed before the uniqueness check, so " X " and "X"
    /// refer to the same habit.
    ///
    /// # Errors
    ///
    /// Returns `HabitServiceError::Habit` for an empty name,
    /// `HabitServiceError::DuplicateName` if the name is taken, and
    /// `HabitServiceError::Storage` if persistence fails.
    pub async fn add_habit(&self, name: String) -> Result<Habit, HabitServiceError> {
        let now = self.clock.now();
        let habit = Habit::new(HabitId::new(1), name, now)?;

        if self.habits.find_habit_by_name(habit.name()).await?.is_some() {
            return Err(HabitServiceError::DuplicateName {
                name: habit.name().to_owned(),
            });
        }

        let id = self
            .habits
            .insert_new_habit(NewHabitRecord::from_habit(&habit))
            .await?;
        let created = Habit::new(id, habit.name(), now)?;
        Ok(created)
    }

    /// Rename a habit while keeping its id and creation time.
    ///
    /// Renaming a habit to its own current name is a no-op success; only
    /// a name held by a *different* habit is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `HabitServiceError::Storage` with `StorageError::NotFound`
    /// for an unknown id, `HabitServiceError::Habit` for an empty name,
    /// and `HabitServiceError::DuplicateName` on collision.
    pub async fn rename_habit(
        &self,
        id: HabitId,
        new_name: String,
    ) -> Result<Habit, HabitServiceError> {
        let existing = self
            .habits
            .get_habit(id)
            .await?
            .ok_or(storage::repository::StorageError::NotFound)?;

        let renamed = Habit::new(id, new_name, existing.created_at())?;

        if let Some(other) = self.habits.find_habit_by_name(renamed.name()).await? {
            if other.id() != id {
                return Err(HabitServiceError::DuplicateName {
                    name: renamed.name().to_owned(),
                });
            }
        }

        self.habits.update_habit_name(id, renamed.name()).await?;
        Ok(renamed)
    }

    /// Delete a habit together with all of its logs.
    ///
    /// # Errors
    ///
    /// Returns `HabitServiceError::Storage` with `StorageError::NotFound`
    /// for an unknown id, or other storage errors.
    pub async fn delete_habit(&self, id: HabitId) -> Result<(), HabitServiceError> {
        self.habits.delete_habit(id).await?;
        Ok(())
    }
}
