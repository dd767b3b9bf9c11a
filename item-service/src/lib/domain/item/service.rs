use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for item operations.
pub struct ItemService<IR>
where
    IR: ItemRepository,
{
    repository: Arc<IR>,
}

impl<IR> ItemService<IR>
where
    IR: ItemRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> ItemServicePort for ItemService<IR>
where
    IR: ItemRepository,
{
    async fn create_item(
        &self,
        owner: &UserId,
        command: CreateItemCommand,
    ) -> Result<Item, ItemError> {
        let item = Item {
            id: ItemId::new(),
            owner_id: *owner,
            name: command.name,
            created_at: Utc::now(),
        };

        let created_item = self.repository.create(item).await?;
        tracing::debug!(
            item_id = %created_item.id,
            owner_id = %created_item.owner_id,
            "Item created"
        );

        Ok(created_item)
    }

    async fn list_items(&self, owner: &UserId) -> Result<Vec<Item>, ItemError> {
        self.repository.find_by_owner(owner).await
    }
}
