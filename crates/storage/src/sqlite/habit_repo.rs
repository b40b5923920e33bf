use habit_core::model::{Habit, HabitId};

use super::SqliteRepository;
use super::mapping::{habit_id_from_i64, habit_id_to_i64, map_habit_row, map_write_err};
use crate::repository::{HabitRepository, NewHabitRecord, StorageError};

#[async_trait::async_trait]
impl HabitRepository for SqliteRepository {
    async fn insert_new_habit(&self, habit: NewHabitRecord) -> Result<HabitId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO habits (name, created_at)
            VALUES (?1, ?2)
            ",
        )
        .bind(habit.name)
        .bind(habit.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        habit_id_from_i64(res.last_insert_rowid())
    }

    async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, created_at
            FROM habits WHERE id = ?1
            ",
        )
        .bind(habit_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_habit_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn find_habit_by_name(&self, name: &str) -> Result<Option<Habit>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, created_at
            FROM habits WHERE name = ?1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_habit_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, created_at
            FROM habits
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut habits = Vec::with_capacity(rows.len());
        for row in rows {
            habits.push(map_habit_row(&row)?);
        }
        Ok(habits)
    }

    async fn update_habit_name(&self, id: HabitId, name: &str) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE habits SET name = ?2 WHERE id = ?1
            ",
        )
        .bind(habit_id_to_i64(id)?)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_habit(&self, id: HabitId) -> Result<(), StorageError> {
        let habit_id = habit_id_to_i64(id)?;

        // Logs and habit go in one transaction; a missing habit rolls the
        // log delete back so no partial cascade is ever visible.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query("DELETE FROM habit_logs WHERE habit_id = ?1")
            .bind(habit_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let res = sqlx::query("DELETE FROM habits WHERE id = ?1")
            .bind(habit_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
