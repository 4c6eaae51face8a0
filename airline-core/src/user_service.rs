use std::sync::Arc;

use airline_shared::Masked;
use tracing::{info, warn};

use crate::repository::UserRepository;
use crate::user::{Principal, User, UserRecord};
use crate::vault::{CredentialVault, PasswordEncoder};
use crate::{CoreError, CoreResult};

/// User use cases. PII passes through the [`CredentialVault`] on every write and read;
/// the password only ever goes through the one-way hash.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    vault: CredentialVault,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, vault: CredentialVault) -> Self {
        Self { repo, vault }
    }

    /// Builds the stored form. Fails before anything reaches the repository.
    fn seal(&self, user: User) -> CoreResult<UserRecord> {
        let password = user
            .password
            .ok_or_else(|| CoreError::Validation("password is required".to_string()))?;

        Ok(UserRecord {
            nif_ciphertext: self.vault.encrypt_pii(user.nif.expose())?,
            email_ciphertext: self.vault.encrypt_pii(user.email.expose())?,
            password_digest: self.vault.hash_password(password.expose()),
            username: user.username,
            name: user.name,
            surname: user.surname,
            roles: user.roles,
        })
    }

    fn open(&self, record: UserRecord) -> CoreResult<User> {
        Ok(User {
            nif: Masked::new(self.vault.decrypt_pii(&record.nif_ciphertext)?),
            email: Masked::new(self.vault.decrypt_pii(&record.email_ciphertext)?),
            password: None,
            username: record.username,
            name: record.name,
            surname: record.surname,
            roles: record.roles,
        })
    }

    pub async fn exists(&self, username: &str) -> bool {
        self.repo.exists(username).await
    }

    pub async fn create(&self, user: User) -> CoreResult<()> {
        let username = user.username.clone();
        if self.repo.exists(&username).await {
            return Err(CoreError::Conflict(format!("User {}", username)));
        }

        let record = self.seal(user)?;
        if !self.repo.create(record).await {
            return Err(CoreError::Conflict(format!("User {}", username)));
        }
        info!("User {} created", username);
        Ok(())
    }

    pub async fn get(&self, username: &str) -> CoreResult<User> {
        let record = self
            .repo
            .get(username)
            .await
            .ok_or_else(|| CoreError::NotFound(format!("User {}", username)))?;
        self.open(record)
    }

    /// Usernames are immutable: the payload must address the same user.
    pub async fn update(&self, username: &str, user: User) -> CoreResult<()> {
        if user.username != username {
            return Err(CoreError::Validation(format!(
                "username cannot change from {} to {}",
                username, user.username
            )));
        }
        if !self.repo.exists(username).await {
            return Err(CoreError::NotFound(format!("User {}", username)));
        }

        let record = self.seal(user)?;
        if !self.repo.update(record).await {
            return Err(CoreError::NotFound(format!("User {}", username)));
        }
        info!("User {} updated", username);
        Ok(())
    }

    pub async fn delete(&self, username: &str) -> CoreResult<()> {
        if !self.repo.delete(username).await {
            return Err(CoreError::NotFound(format!("User {}", username)));
        }
        info!("User {} deleted", username);
        Ok(())
    }

    /// Credential check for the authentication layer.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        let Some(record) = self.repo.get(username).await else {
            warn!("Authentication failed: unknown user {}", username);
            return None;
        };
        if !self.vault.matches(password, &record.password_digest) {
            warn!("Authentication failed: bad password for {}", username);
            return None;
        }
        Some(Principal::from(&record))
    }
}
