#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::{TestRequest, TestServer};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use shortlink::application::services::hash_token;
use shortlink::domain::StoreError;
use shortlink::domain::entities::{Caller, NewCaller, NewLink};
use shortlink::domain::repositories::{CallerRepository, LinkRepository};
use shortlink::infrastructure::cache::{CacheService, MemoryCache};
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes::router;
use shortlink::state::{AppState, StateOptions};
use shortlink::utils::deadline::CallDeadlines;

pub const SECRET: &str = "test-signing-secret";

/// Client address reported through `X-Forwarded-For`.
pub const CLIENT_IP: &str = "203.0.113.7";

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const INACTIVE_TOKEN: &str = "inactive-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

pub const ALICE_ID: i64 = 1;
pub const BOB_ID: i64 = 2;
pub const ADMIN_ID: i64 = 3;

/// Caller registry backed by a vector.
pub struct MemoryCallers {
    callers: Mutex<Vec<Caller>>,
}

impl MemoryCallers {
    pub fn seeded() -> Self {
        let caller = |id, name: &str, token: &str, is_active, is_admin, revoked: bool| Caller {
            id,
            name: name.to_string(),
            token_hash: hash_token(SECRET, token),
            is_active,
            is_admin,
            created_at: Utc::now(),
            revoked_at: revoked.then(Utc::now),
        };

        Self {
            callers: Mutex::new(vec![
                caller(ALICE_ID, "alice", ALICE_TOKEN, true, false, false),
                caller(BOB_ID, "bob", BOB_TOKEN, true, false, false),
                caller(ADMIN_ID, "admin", ADMIN_TOKEN, true, true, false),
                caller(4, "dormant", INACTIVE_TOKEN, false, false, false),
                caller(5, "former", REVOKED_TOKEN, true, false, true),
            ]),
        }
    }

    fn find(&self, pred: impl Fn(&Caller) -> bool) -> Option<Caller> {
        self.callers.lock().unwrap().iter().find(|c| pred(c)).cloned()
    }

    fn update(&self, id: i64, f: impl FnOnce(&mut Caller)) -> Result<(), StoreError> {
        let mut callers = self.callers.lock().unwrap();
        let caller = callers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        f(caller);
        Ok(())
    }
}

#[async_trait]
impl CallerRepository for MemoryCallers {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Caller>, StoreError> {
        Ok(self.find(|c| c.token_hash == token_hash && !c.is_revoked()))
    }

    async fn create(&self, new_caller: NewCaller) -> Result<Caller, StoreError> {
        let mut callers = self.callers.lock().unwrap();
        let caller = Caller {
            id: callers.len() as i64 + 1,
            name: new_caller.name,
            token_hash: new_caller.token_hash,
            is_active: new_caller.is_active,
            is_admin: new_caller.is_admin,
            created_at: Utc::now(),
            revoked_at: None,
        };
        callers.push(caller.clone());
        Ok(caller)
    }

    async fn list(&self) -> Result<Vec<Caller>, StoreError> {
        Ok(self.callers.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Caller>, StoreError> {
        Ok(self.find(|c| c.id == id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Caller>, StoreError> {
        Ok(self.find(|c| c.name == name))
    }

    async fn revoke(&self, id: i64) -> Result<(), StoreError> {
        self.update(id, |c| c.revoked_at = Some(Utc::now()))
    }

    async fn set_active(&self, id: i64, is_active: bool) -> Result<(), StoreError> {
        self.update(id, |c| c.is_active = is_active)
    }
}

/// Server over in-memory store and cache, with handles to both.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<MemoryLinkRepository>,
    pub cache: Arc<MemoryCache>,
}

impl TestApp {
    pub fn new() -> Self {
        let links = Arc::new(MemoryLinkRepository::new());
        let cache = Arc::new(MemoryCache::new());
        let server = server_with(links.clone(), cache.clone());

        Self {
            server,
            links,
            cache,
        }
    }

    /// Inserts a link directly into the store.
    pub async fn seed_link(&self, identifier: &str, destination: &str, owner_id: Option<i64>) {
        self.links
            .insert(NewLink {
                identifier: identifier.to_string(),
                destination: destination.to_string(),
                owner_id,
            })
            .await
            .unwrap();
    }

    pub fn get(&self, path: &str) -> TestRequest {
        self.server.get(path).add_header("X-Forwarded-For", CLIENT_IP)
    }

    pub fn post(&self, path: &str) -> TestRequest {
        self.server.post(path).add_header("X-Forwarded-For", CLIENT_IP)
    }

    pub fn delete(&self, path: &str) -> TestRequest {
        self.server.delete(path).add_header("X-Forwarded-For", CLIENT_IP)
    }

    pub async fn access_count(&self, identifier: &str) -> i64 {
        self.links
            .find_by_identifier(identifier)
            .await
            .unwrap()
            .map(|l| l.access_count)
            .unwrap_or(-1)
    }
}

pub fn test_state(links: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(
        links,
        Arc::new(MemoryCallers::seeded()),
        cache,
        StateOptions {
            cache_ttl: Duration::from_secs(86_400),
            deadlines: CallDeadlines::default(),
            token_signing_secret: SECRET.to_string(),
        },
    )
}

/// Full router in proxy mode; requests must carry `X-Forwarded-For` so the
/// rate limiter has a client key without a socket peer address.
pub fn server_with(links: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> TestServer {
    TestServer::new(router(test_state(links, cache), true)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_test_caller(pool: &PgPool, name: &str, is_admin: bool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO callers (name, token_hash, is_admin) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(hash_token(SECRET, name))
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap()
}
