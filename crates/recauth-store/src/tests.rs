//! SQLite-backed tests for records and audit log.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    AuditAction, AuditManager, ConnectionManager, NewRecord, PageRequest, RecordsManager,
    StoreConfig, StoreError,
};

/// In-memory SQLite with the schema created.
async fn setup_test_db() -> Arc<ConnectionManager> {
    let config = StoreConfig::new("sqlite::memory:")
        .max_connections(1)
        .retry_delay(Duration::from_millis(10));
    let db = Arc::new(ConnectionManager::new(config).expect("valid url"));
    db.init().await.expect("init in-memory database");
    db
}

/// File-backed SQLite so that several pooled connections share one database.
async fn setup_file_db(dir: &tempfile::TempDir, max_connections: u32) -> Arc<ConnectionManager> {
    let path = dir.path().join("records.db");
    let config = StoreConfig::new(format!("sqlite:{}?mode=rwc", path.display()))
        .max_connections(max_connections)
        .retry_delay(Duration::from_millis(10));
    let db = Arc::new(ConnectionManager::new(config).expect("valid url"));
    db.init().await.expect("init file database");
    db
}

async fn audit_count(db: &ConnectionManager, record_name: &str) -> i64 {
    use sqlx::Row;
    sqlx::query("SELECT COUNT(*) FROM audit_log WHERE record_name = ?")
        .bind(record_name)
        .fetch_one(&db.pool().unwrap())
        .await
        .unwrap()
        .try_get(0)
        .unwrap()
}

/// Create then delete `record_name` `cycles` times, producing `2 * cycles`
/// audit entries.
async fn churn(records: &RecordsManager, record_name: &str, cycles: usize) {
    for i in 0..cycles {
        records
            .create(NewRecord::new(record_name, "alice", "carol").with_data(format!("{{\"n\":{i}}}")))
            .await
            .unwrap();
        records
            .delete(record_name, "alice", "carol")
            .await
            .unwrap()
            .expect("record just created");
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());

    assert!(records.get("quarterly").await.unwrap().is_none());
    assert!(!records.exists("quarterly").await.unwrap());

    let created = records
        .create(NewRecord::new("quarterly", "alice", "carol").with_data(r#"{"rows":3}"#))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert!(created.authorized_at > 0);

    let fetched = records.get("quarterly").await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.data.as_deref(), Some(r#"{"rows":3}"#));
    assert!(records.exists("quarterly").await.unwrap());
}

#[tokio::test]
async fn test_create_writes_one_audit_entry() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());
    let audit = AuditManager::new(db.clone());

    records
        .create(NewRecord::new("quarterly", "alice", "carol"))
        .await
        .unwrap();

    let page = audit
        .get_audit_logs("quarterly", PageRequest::new(1, 10, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(page.number_of_records, 1);
    let entry = &page.records[0];
    assert_eq!(entry.action, AuditAction::Create);
    assert_eq!(entry.username, "alice");
    assert_eq!(entry.authorized_by, "carol");
    assert_eq!(entry.data, None);
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());

    records
        .create(NewRecord::new("quarterly", "alice", "alice"))
        .await
        .unwrap();
    let err = records
        .create(NewRecord::new("quarterly", "bob", "bob"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict(ref name) if name == "quarterly"));
    assert_eq!(err.http_status(), 409);

    // Rolled back: still one record owner and one audit entry.
    assert_eq!(records.get("quarterly").await.unwrap().unwrap().username, "alice");
    assert_eq!(audit_count(&db, "quarterly").await, 1);
}

#[tokio::test]
async fn test_delete_appends_audit_with_data() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());
    let audit = AuditManager::new(db.clone());

    records
        .create(NewRecord::new("quarterly", "alice", "alice").with_data(r#"{"k":"v"}"#))
        .await
        .unwrap();
    let deleted = records
        .delete("quarterly", "bob", "carol")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.record_name, "quarterly");
    assert_eq!(deleted.username, "alice");
    assert!(records.get("quarterly").await.unwrap().is_none());

    let page = audit
        .get_audit_logs("quarterly", PageRequest::new(1, 10, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(page.number_of_records, 2);
    assert_eq!(page.records[0].action, AuditAction::Create);
    let entry = &page.records[1];
    assert_eq!(entry.action, AuditAction::Delete);
    assert_eq!(entry.username, "bob");
    assert_eq!(entry.authorized_by, "carol");
    assert_eq!(entry.data.as_deref(), Some(r#"{"k":"v"}"#));
}

#[tokio::test]
async fn test_delete_missing_writes_nothing() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());

    assert!(records.delete("ghost", "alice", "alice").await.unwrap().is_none());
    assert_eq!(audit_count(&db, "ghost").await, 0);
}

#[tokio::test]
async fn test_concurrent_deletes_remove_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_file_db(&dir, 2).await;
    let records = RecordsManager::new(db.clone());

    records
        .create(NewRecord::new("quarterly", "alice", "alice").with_data(r#"{"k":"v"}"#))
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        records.delete("quarterly", "alice", "alice"),
        records.delete("quarterly", "bob", "bob"),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(
        first.is_some() != second.is_some(),
        "exactly one delete must win: {first:?} {second:?}"
    );
    // One create and one delete entry.
    assert_eq!(audit_count(&db, "quarterly").await, 2);
    assert!(records.get("quarterly").await.unwrap().is_none());
}

#[tokio::test]
async fn test_audit_empty_page() {
    let db = setup_test_db().await;
    let audit = AuditManager::new(db);

    let page = audit
        .get_audit_logs("nothing", PageRequest::new(1, 10, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(page.number_of_records, 0);
    assert_eq!(page.number_of_records_returned, 0);
    assert_eq!(page.next_record, None);
    assert!(page.records.is_empty());
}

#[tokio::test]
async fn test_audit_pagination() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());
    let audit = AuditManager::new(db.clone());

    // 12 entries for the target, noise on another record.
    churn(&records, "quarterly", 6).await;
    churn(&records, "other", 2).await;

    let first = audit
        .get_audit_logs("quarterly", PageRequest::new(1, 5, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(first.number_of_records, 12);
    assert_eq!(first.number_of_records_returned, 5);
    assert_eq!(first.next_record, Some(6));
    assert!(first.records.iter().all(|r| r.record_name == "quarterly"));
    assert!(first.records.windows(2).all(|w| w[0].id < w[1].id));

    let second = audit
        .get_audit_logs("quarterly", PageRequest::new(6, 5, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(second.number_of_records_returned, 5);
    assert_eq!(second.next_record, Some(11));
    assert!(first.records.last().unwrap().id < second.records[0].id);

    let last = audit
        .get_audit_logs("quarterly", PageRequest::new(11, 5, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(last.number_of_records_returned, 2);
    assert_eq!(last.next_record, None);
    assert_eq!(last.records[1].action, AuditAction::Delete);

    let beyond = audit
        .get_audit_logs("quarterly", PageRequest::new(50, 5, 100).unwrap())
        .await
        .unwrap();
    assert_eq!(beyond.number_of_records, 12);
    assert_eq!(beyond.number_of_records_returned, 0);
    assert_eq!(beyond.next_record, None);
}

#[tokio::test]
async fn test_returned_never_exceeds_bounds() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());
    let audit = AuditManager::new(db.clone());
    churn(&records, "quarterly", 4).await;
    let total = 8u64;

    for start in 1..=10u64 {
        for max in 1..=9u64 {
            let page = audit
                .get_audit_logs("quarterly", PageRequest::new(start, max, 100).unwrap())
                .await
                .unwrap();
            let expected = max.min(total.saturating_sub(start - 1));
            assert_eq!(page.number_of_records_returned, expected, "start={start} max={max}");
            assert_eq!(page.records.len() as u64, expected);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_page_consistent_under_concurrent_writes() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_file_db(&dir, 4).await;
    let audit = AuditManager::new(db.clone());

    let writer = {
        let records = RecordsManager::new(db.clone());
        tokio::spawn(async move { churn(&records, "quarterly", 40).await })
    };

    let max = 50u64;
    let mut pages = 0;
    while !writer.is_finished() || pages == 0 {
        let page = audit
            .get_audit_logs("quarterly", PageRequest::new(1, max, 100).unwrap())
            .await
            .unwrap();
        let total = page.number_of_records;
        let returned = page.number_of_records_returned;

        assert_eq!(returned, max.min(total), "total={total}");
        assert_eq!(page.records.len() as u64, returned);
        if returned == total {
            assert_eq!(page.next_record, None);
        } else {
            assert_eq!(page.next_record, Some(returned + 1));
        }
        pages += 1;
    }

    writer.await.unwrap();
    assert_eq!(audit_count(&db, "quarterly").await, 80);
}

#[tokio::test]
async fn test_operations_after_shutdown_fail() {
    let db = setup_test_db().await;
    let records = RecordsManager::new(db.clone());
    db.shutdown().await.unwrap();

    let err = records.get("quarterly").await.unwrap_err();
    assert!(matches!(err, StoreError::NotInitialized));
}
