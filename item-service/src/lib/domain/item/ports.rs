use async_trait::async_trait;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::user::models::UserId;

/// Port for item domain service operations.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// Create a new item owned by `owner`.
    ///
    /// # Arguments
    /// * `owner` - Authenticated user creating the item
    /// * `command` - Validated item fields
    ///
    /// # Returns
    /// Created item entity
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_item(&self, owner: &UserId, command: CreateItemCommand)
        -> Result<Item, ItemError>;

    /// List every item owned by `owner`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_items(&self, owner: &UserId) -> Result<Vec<Item>, ItemError>;
}

/// Persistence operations for items.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Persist new item to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, item: Item) -> Result<Item, ItemError>;

    /// Retrieve all items of one owner in creation order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Item>, ItemError>;
}
