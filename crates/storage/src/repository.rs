use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use habit_core::model::{Habit, HabitId, HabitLog, HabitLogId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a habit; the id is assigned by the backend.
#[derive(Debug, Clone)]
pub struct NewHabitRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl NewHabitRecord {
    #[must_use]
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            name: habit.name().to_owned(),
            created_at: habit.created_at(),
        }
    }
}

/// Repository contract for habits.
///
/// Habit names are unique; backends report a duplicate as
/// `StorageError::Conflict`.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Persist a new habit and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the name is already taken, or
    /// other storage errors.
    async fn insert_new_habit(&self, habit: NewHabitRecord) -> Result<HabitId, StorageError>;

    /// Fetch a habit by id. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, StorageError>;

    /// Fetch a habit by exact (trimmed) name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn find_habit_by_name(&self, name: &str) -> Result<Option<Habit>, StorageError>;

    /// All habits in creation order (ascending id).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Rename a habit in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown and
    /// `StorageError::Conflict` if the name is taken by another habit.
    async fn update_habit_name(&self, id: HabitId, name: &str) -> Result<(), StorageError>;

    /// Delete a habit and all of its logs as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown; on any
    /// failure no partial delete is observable.
    async fn delete_habit(&self, id: HabitId) -> Result<(), StorageError>;
}

/// Repository contract for per-day completion logs.
#[async_trait]
pub trait HabitLogRepository: Send + Sync {
    /// Create or update the log for `(habit_id, log_date)`.
    ///
    /// At most one row exists per pair; concurrent upserts must not
    /// create duplicates.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the habit does not exist, or
    /// other storage errors.
    async fn upsert_log(
        &self,
        habit_id: HabitId,
        log_date: NaiveDate,
        status: bool,
    ) -> Result<HabitLog, StorageError>;

    /// All logs whose date falls in the given year/month.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for an invalid month, or
    /// other storage errors.
    async fn logs_for_month(&self, year: i32, month: u32) -> Result<Vec<HabitLog>, StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    habits: HashMap<HabitId, Habit>,
    logs: HashMap<(HabitId, NaiveDate), HabitLog>,
    next_habit_id: u64,
    next_log_id: u64,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl HabitRepository for InMemoryRepository {
    async fn insert_new_habit(&self, habit: NewHabitRecord) -> Result<HabitId, StorageError> {
        let mut state = self.lock()?;
        if state.habits.values().any(|h| h.name() == habit.name) {
            return Err(StorageError::Conflict);
        }
        state.next_habit_id += 1;
        let id = HabitId::new(state.next_habit_id);
        let stored = Habit::new(id, habit.name, habit.created_at)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        state.habits.insert(id, stored);
        Ok(id)
    }

    async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, StorageError> {
        let state = self.lock()?;
        Ok(state.habits.get(&id).cloned())
    }

    async fn find_habit_by_name(&self, name: &str) -> Result<Option<Habit>, StorageError> {
        let state = self.lock()?;
        Ok(state.habits.values().find(|h| h.name() == name).cloned())
    }

    async fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let state = self.lock()?;
        let mut habits: Vec<Habit> = state.habits.values().cloned().collect();
        habits.sort_by_key(Habit::id);
        Ok(habits)
    }

    async fn update_habit_name(&self, id: HabitId, name: &str) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state
            .habits
            .values()
            .any(|h| h.id() != id && h.name() == name)
        {
            return Err(StorageError::Conflict);
        }
        let existing = state.habits.get(&id).ok_or(StorageError::NotFound)?;
        let renamed = Habit::new(id, name, existing.created_at())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        state.habits.insert(id, renamed);
        Ok(())
    }

    async fn delete_habit(&self, id: HabitId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if state.habits.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        state.logs.retain(|&(habit_id, _), _| habit_id != id);
        Ok(())
    }
}

#[async_trait]
impl HabitLogRepository for InMemoryRepository {
    async fn upsert_log(
        &self,
        habit_id: HabitId,
        log_date: NaiveDate,
        status: bool,
    ) -> Result<HabitLog, StorageError> {
        let mut state = self.lock()?;
        if !state.habits.contains_key(&habit_id) {
            return Err(StorageError::NotFound);
        }
        let existing_id = state.logs.get(&(habit_id, log_date)).map(HabitLog::id);
        let id = match existing_id {
            Some(id) => id,
            None => {
                state.next_log_id += 1;
                HabitLogId::new(state.next_log_id)
            }
        };
        let log = HabitLog::new(id, habit_id, log_date, status);
        state.logs.insert((habit_id, log_date), log);
        Ok(log)
    }

    async fn logs_for_month(&self, year: i32, month: u32) -> Result<Vec<HabitLog>, StorageError> {
        let state = self.lock()?;
        let mut logs: Vec<HabitLog> = state
            .logs
            .values()
            .filter(|l| l.log_date().year() == year && l.log_date().month() == month)
            .copied()
            .collect();
        logs.sort_by_key(|l| (l.log_date(), l.habit_id()));
        Ok(logs)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub habits: Arc<dyn HabitRepository>,
    pub habit_logs: Arc<dyn HabitLogRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let habits: Arc<dyn HabitRepository> = Arc::new(repo.clone());
        let habit_logs: Arc<dyn HabitLogRepository> = Arc::new(repo);
        Self { habits, habit_logs }
    }
}
