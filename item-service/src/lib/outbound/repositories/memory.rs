//! In-memory repositories.
//!
//! Used when no database is configured and throughout the test suites.
//! Data lives only as long as the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::ports::ItemRepository;
use crate::domain::user::models::Login;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// User store keyed by login.
///
/// The uniqueness check and the insert happen under one write lock, so concurrent
/// registrations of the same login cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write();
        if users.contains_key(user.login.as_str()) {
            return Err(UserError::LoginTaken(user.login.to_string()));
        }
        users.insert(user.login.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError> {
        Ok(self.users.read().get(login.as_str()).cloned())
    }
}

/// Item store keyed by owner; each owner's items stay in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<UserId, Vec<Item>>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        self.items
            .write()
            .entry(item.owner_id)
            .or_default()
            .push(item.clone());
        Ok(item)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Item>, ItemError> {
        Ok(self.items.read().get(owner).cloned().unwrap_or_default())
    }
}
