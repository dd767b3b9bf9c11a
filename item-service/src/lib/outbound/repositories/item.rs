use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::ports::ItemRepository;
use crate::domain::user::models::UserId;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: ItemId(row.id),
            owner_id: UserId(row.owner_id),
            name: ItemName::new(row.name)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, owner_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.id.0)
        .bind(item.owner_id.0)
        .bind(item.name.as_str())
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(item)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM items
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Item::try_from).collect()
    }
}
