use habit_core::model::{Habit, HabitId, HabitLog, HabitLogId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn habit_id_from_i64(v: i64) -> Result<HabitId, StorageError> {
    Ok(HabitId::new(i64_to_u64("habit_id", v)?))
}

fn habit_log_id_from_i64(v: i64) -> Result<HabitLogId, StorageError> {
    Ok(HabitLogId::new(i64_to_u64("habit_log_id", v)?))
}

pub(crate) fn habit_id_to_i64(id: HabitId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("habit_id overflow".into()))
}

/// Maps a write error, distinguishing constraint violations the caller
/// cares about: a unique-name or unique-day collision becomes `Conflict`,
/// a missing referenced habit becomes `NotFound`.
pub(crate) fn map_write_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn map_habit_row(row: &sqlx::sqlite::SqliteRow) -> Result<Habit, StorageError> {
    let id = habit_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    Habit::new(
        id,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_habit_log_row(row: &sqlx::sqlite::SqliteRow) -> Result<HabitLog, StorageError> {
    Ok(HabitLog::new(
        habit_log_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        habit_id_from_i64(row.try_get::<i64, _>("habit_id").map_err(ser)?)?,
        row.try_get("log_date").map_err(ser)?,
        row.try_get::<i64, _>("status").map_err(ser)? != 0,
    ))
}
