use chrono::NaiveDate;
use habit_core::model::{HabitId, HabitLog};

use super::SqliteRepository;
use super::mapping::{habit_id_to_i64, map_habit_log_row, map_write_err};
use crate::repository::{HabitLogRepository, StorageError};

#[async_trait::async_trait]
impl HabitLogRepository for SqliteRepository {
    async fn upsert_log(
        &self,
        habit_id: HabitId,
        log_date: NaiveDate,
        status: bool,
    ) -> Result<HabitLog, StorageError> {
        let id = habit_id_to_i64(habit_id)?;
        let status_int: i64 = if status { 1 } else { 0 };

        // Single statement keyed on the (habit_id, log_date) unique index,
        // so concurrent saves for the same day can never produce two rows.
        sqlx::query(
            r"
            INSERT INTO habit_logs (habit_id, log_date, status)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(habit_id, log_date) DO UPDATE SET
                status = excluded.status
            ",
        )
        .bind(id)
        .bind(log_date)
        .bind(status_int)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        let row = sqlx::query(
            r"
            SELECT id, habit_id, log_date, status
            FROM habit_logs
            WHERE habit_id = ?1 AND log_date = ?2
            ",
        )
        .bind(id)
        .bind(log_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_habit_log_row(&row)
    }

    async fn logs_for_month(&self, year: i32, month: u32) -> Result<Vec<HabitLog>, StorageError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| StorageError::Serialization(format!("invalid month: {year}-{month}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| StorageError::Serialization(format!("invalid month: {year}-{month}")))?;

        let rows = sqlx::query(
            r"
            SELECT id, habit_id, log_date, status
            FROM habit_logs
            WHERE log_date >= ?1 AND log_date < ?2
            ORDER BY log_date ASC, habit_id ASC
            ",
        )
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut logs = Vec::with_capacity(rows.len());
        for row in rows {
            logs.push(map_habit_log_row(&row)?);
        }
        Ok(logs)
    }
}
