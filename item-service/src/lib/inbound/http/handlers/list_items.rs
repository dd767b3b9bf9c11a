use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::item::models::Item;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::principal::Principal;
use crate::inbound::http::router::AppState;

pub async fn list_items<AS, IS>(
    State(state): State<AppState<AS, IS>>,
    principal: Principal,
) -> Result<ApiSuccess<Vec<ItemData>>, ApiError>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    state
        .item_service
        .list_items(&principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|items| {
            ApiSuccess::new(
                StatusCode::OK,
                items.iter().map(ItemData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub id: String,
    pub name: String,
}

impl From<&Item> for ItemData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.as_str().to_string(),
        }
    }
}
