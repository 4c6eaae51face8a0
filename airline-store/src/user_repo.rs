use airline_core::repository::UserRepository;
use airline_core::UserRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Users keyed by username, holding only the sealed record.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: UserRecord) -> bool {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return false;
        }
        users.insert(user.username.clone(), user);
        true
    }

    async fn update(&self, user: UserRecord) -> bool {
        match self.users.write().await.get_mut(&user.username) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    async fn delete(&self, username: &str) -> bool {
        self.users.write().await.remove(username).is_some()
    }

    async fn get(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    async fn exists(&self, username: &str) -> bool {
        self.users.read().await.contains_key(username)
    }
}
