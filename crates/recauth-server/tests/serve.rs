//! Bootstrap and shutdown of the full server.

use std::sync::Arc;
use std::time::Duration;

use recauth_config::{AuthConfig, Config, DatabaseConfig, UserEntry, load_config};
use recauth_server::{
    CancellationToken, ServerError, run_with_shutdown, serve_with_store, store_config,
};
use recauth_store::{ConnectionManager, StoreError};

fn config(db_url: &str) -> Config {
    let mut database = DatabaseConfig::with_url(db_url);
    database.max_connections = 1;
    database.max_connect_retries = 2;
    database.retry_delay_ms = 10;
    Config {
        server: recauth_config::ServerConfig {
            listen: "127.0.0.1:0".into(),
            shutdown_timeout_secs: 1,
        },
        database,
        auth: AuthConfig {
            users: vec![UserEntry::new("alice", "pw1")],
        },
        records: Default::default(),
        catalog: Default::default(),
        pagination: Default::default(),
        logging: Default::default(),
    }
}

#[tokio::test]
async fn test_unreachable_store_aborts_startup() {
    let err = run_with_shutdown(
        config("sqlite:/nonexistent-recauth-dir/records.db?mode=ro"),
        CancellationToken::new(),
    )
    .await
    .unwrap_err();

    match err {
        ServerError::Store(StoreError::ConnectFailed { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected ConnectFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_stops_server() {
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(run_with_shutdown(config("sqlite::memory:"), shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops after cancel")
        .unwrap();
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
async fn test_bind_failure_closes_store() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = config("sqlite::memory:");
    config.server.listen = taken.local_addr().unwrap().to_string();

    let db = Arc::new(ConnectionManager::new(store_config(&config.database).unwrap()).unwrap());
    db.init().await.unwrap();
    assert!(db.is_ready());

    let err = serve_with_store(&config, db.clone(), CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Io(_)), "got {err:?}");
    assert!(!db.is_ready());
}

#[test]
fn test_store_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recauth.toml");
    std::fs::write(
        &path,
        r#"
[database]
host = "db.internal"
database = "records"
username = "svc"
max_connect_retries = 7
retry_delay_ms = 250

[[auth.users]]
username = "alice"
password = "pw1"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    let store = store_config(&config.database).unwrap();
    assert_eq!(store.database_url, "postgres://svc@db.internal:5432/records");
    assert_eq!(store.max_connect_retries, 7);
    assert_eq!(store.retry_delay, Duration::from_millis(250));
}
