use chrono::NaiveDate;
use habit_core::model::HabitId;
use habit_core::time::fixed_now;
use storage::repository::{HabitLogRepository, HabitRepository, NewHabitRecord, StorageError};
use storage::sqlite::SqliteRepository;

fn record(name: &str) -> NewHabitRecord {
    NewHabitRecord {
        name: name.to_owned(),
        created_at: fixed_now(),
    }
}

fn nov(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, day).unwrap()
}

async fn connect(url: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrips_habits_in_creation_order() {
    let repo = connect("sqlite:file:memdb_habit_roundtrip?mode=memory&cache=shared").await;

    let a = repo.insert_new_habit(record("Morning run")).await.unwrap();
    let b = repo.insert_new_habit(record("Read")).await.unwrap();
    assert!(a < b);

    let habits = repo.list_habits().await.unwrap();
    assert_eq!(habits.len(), 2);
    assert_eq!(habits[0].id(), a);
    assert_eq!(habits[0].name(), "Morning run");
    assert_eq!(habits[0].created_at(), fixed_now());
    assert_eq!(habits[1].name(), "Read");

    let by_name = repo.find_habit_by_name("Read").await.unwrap();
    assert_eq!(by_name.map(|h| h.id()), Some(b));

    assert!(repo.get_habit(HabitId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_rejects_duplicate_names() {
    let repo = connect("sqlite:file:memdb_habit_dupe?mode=memory&cache=shared").await;

    repo.insert_new_habit(record("Read")).await.unwrap();
    let err = repo.insert_new_habit(record("Read")).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let a = repo.insert_new_habit(record("Stretch")).await.unwrap();
    let err = repo.update_habit_name(a, "Read").await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let err = repo
        .update_habit_name(HabitId::new(999), "Anything")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_upsert_is_idempotent_and_toggles() {
    let repo = connect("sqlite:file:memdb_log_upsert?mode=memory&cache=shared").await;
    let id = repo.insert_new_habit(record("Read")).await.unwrap();

    let first = repo.upsert_log(id, nov(3), true).await.unwrap();
    let again = repo.upsert_log(id, nov(3), true).await.unwrap();
    assert_eq!(first.id(), again.id());
    assert!(again.status());

    let toggled = repo.upsert_log(id, nov(3), false).await.unwrap();
    assert_eq!(toggled.id(), first.id());
    assert!(!toggled.status());

    let logs = repo.logs_for_month(2023, 11).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].status());
}

#[tokio::test]
async fn sqlite_upsert_for_unknown_habit_is_not_found() {
    let repo = connect("sqlite:file:memdb_log_fk?mode=memory&cache=shared").await;

    let err = repo
        .upsert_log(HabitId::new(42), nov(1), true)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_logs_for_month_filters_by_range() {
    let repo = connect("sqlite:file:memdb_log_month?mode=memory&cache=shared").await;
    let id = repo.insert_new_habit(record("Read")).await.unwrap();

    repo.upsert_log(id, nov(1), true).await.unwrap();
    repo.upsert_log(id, nov(30), true).await.unwrap();
    repo.upsert_log(id, NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(), true)
        .await
        .unwrap();
    repo.upsert_log(id, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(), true)
        .await
        .unwrap();

    let logs = repo.logs_for_month(2023, 11).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.log_date().to_string().starts_with("2023-11")));

    let december = repo.logs_for_month(2023, 12).await.unwrap();
    assert_eq!(december.len(), 1);
    assert_eq!(december[0].day_of_month(), 1);
}

#[tokio::test]
async fn sqlite_delete_habit_cascades_to_logs() {
    let repo = connect("sqlite:file:memdb_habit_delete?mode=memory&cache=shared").await;
    let keep = repo.insert_new_habit(record("Keep")).await.unwrap();
    let gone = repo.insert_new_habit(record("Gone")).await.unwrap();

    repo.upsert_log(keep, nov(1), true).await.unwrap();
    repo.upsert_log(gone, nov(1), true).await.unwrap();
    repo.upsert_log(gone, nov(2), false).await.unwrap();

    repo.delete_habit(gone).await.unwrap();

    let logs = repo.logs_for_month(2023, 11).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].habit_id(), keep);

    let err = repo.delete_habit(gone).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
