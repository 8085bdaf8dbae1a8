//! `UserRepository` backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserId};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    by_email: Mutex<HashMap<Email, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |users| users.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Email, User>>, UserPersistenceError> {
        self.by_email
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(email).cloned())
    }

    async fn create(
        &self,
        email: &Email,
        password_hash: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        if users.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email.as_str()));
        }
        let user = User::new(UserId::random(), email.clone(), password_hash.clone());
        users.insert(email.clone(), user.clone());
        Ok(user)
    }
}
