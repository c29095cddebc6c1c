//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `newsdesk_test`)
//!   `TEST_DB_PASSWORD` (default: `newsdesk_test`)
//!   `TEST_DB_NAME` (default: `newsdesk_test`)

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use newsdesk_db::{
    entities::user,
    repositories::{BanRecordRepository, UserRepository},
    test_utils::{TestDatabase, TestDbConfig},
};
use sea_orm::Set;
use std::sync::Arc;

fn test_user_model(id: i64, tier: i32) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(id),
        username: Set(format!("user{id}")),
        nickname: Set(format!("User {id}")),
        tier: Set(tier),
        level: Set(0),
        is_banned: Set(false),
        submitted_count: Set(0),
        accepted_count: Set(0),
        rejected_count: Set(0),
        reviewed_count: Set(0),
        created_at: Set(Utc::now()),
        modified_at: Set(Utc::now()),
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let result = TestDatabase::new().await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_ban_unban_ban_leaves_three_rows_in_order() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();

    let conn = Arc::clone(&db.conn);
    let users = UserRepository::new(conn.clone());
    let bans = BanRecordRepository::new(conn);

    users.create(test_user_model(1, 10)).await.unwrap();

    bans.apply_ban(1, 99, true, "first".to_string(), Utc::now())
        .await
        .unwrap();
    bans.apply_ban(1, 99, false, "appeal".to_string(), Utc::now())
        .await
        .unwrap();
    bans.apply_ban(1, 99, true, "again".to_string(), Utc::now())
        .await
        .unwrap();

    let history = bans.history(1).await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].is_ban);
    assert!(!history[1].is_ban);
    assert!(history[2].is_ban);
    assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let target = users.get_by_id(1).await.unwrap();
    assert!(target.is_banned);

    db.cleanup().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
}
