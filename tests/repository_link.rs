//! PostgreSQL link repository tests.
//!
//! Require a database: `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use sqlx::PgPool;
use std::sync::Arc;
use shortlink::domain::StoreError;
use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::utils::db_error::LINKS_IDENTIFIER_CONSTRAINT;

fn new_link(identifier: &str, owner_id: Option<i64>) -> NewLink {
    NewLink {
        identifier: identifier.to_string(),
        destination: "https://example.com".to_string(),
        owner_id,
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_insert_link(pool: PgPool) {
    let owner = common::create_test_caller(&pool, "owner", false).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.insert(new_link("test12345", Some(owner))).await.unwrap();

    assert_eq!(link.identifier, "test12345");
    assert_eq!(link.destination, "https://example.com");
    assert_eq!(link.access_count, 0);
    assert_eq!(link.owner_id, Some(owner));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_identifier_is_uniqueness_violation(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("dup000001", None)).await.unwrap();

    let err = repo.insert(new_link("dup000001", None)).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::UniquenessViolation {
            constraint: LINKS_IDENTIFIER_CONSTRAINT.to_string()
        }
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_and_exists(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("find00001", None)).await.unwrap();

    assert!(repo.exists_by_identifier("find00001").await.unwrap());
    assert!(!repo.exists_by_identifier("absent001").await.unwrap());
    assert!(repo.find_by_identifier("find00001").await.unwrap().is_some());
    assert!(repo.find_by_identifier("absent001").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert(new_link("count0001", None)).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_access_count("count0001").await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let link = repo.find_by_identifier("count0001").await.unwrap().unwrap();
    assert_eq!(link.access_count, 20);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_increment_missing_is_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(
        repo.increment_access_count("absent001").await,
        Err(StoreError::NotFound)
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("delete001", None)).await.unwrap();

    assert_eq!(repo.delete("delete001").await, Ok(()));
    assert_eq!(repo.delete("delete001").await, Err(StoreError::NotFound));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_by_owner_and_list_all(pool: PgPool) {
    let alice = common::create_test_caller(&pool, "alice", false).await;
    let bob = common::create_test_caller(&pool, "bob", false).await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("alice0001", Some(alice))).await.unwrap();
    repo.insert(new_link("alice0002", Some(alice))).await.unwrap();
    repo.insert(new_link("bob000001", Some(bob))).await.unwrap();

    let mine = repo.list_by_owner(alice).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].identifier, "alice0002");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    let bobs = all.iter().find(|r| r.link.identifier == "bob000001").unwrap();
    assert_eq!(bobs.owner_name.as_deref(), Some("bob"));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}
