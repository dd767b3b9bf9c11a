use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::item::errors::ItemNameError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::ItemName;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::principal::Principal;
use crate::inbound::http::router::AppState;

pub async fn create_item<AS, IS>(
    State(state): State<AppState<AS, IS>>,
    principal: Principal,
    Json(body): Json<CreateItemRequest>,
) -> Result<StatusCode, ApiError>
where
    AS: AuthServicePort,
    IS: ItemServicePort,
{
    state
        .item_service
        .create_item(&principal.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// HTTP request body for creating an item (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateItemRequest {
    name: String,
}

impl CreateItemRequest {
    fn try_into_command(self) -> Result<CreateItemCommand, ItemNameError> {
        Ok(CreateItemCommand::new(ItemName::new(self.name)?))
    }
}

impl From<ItemNameError> for ApiError {
    fn from(err: ItemNameError) -> Self {
        ApiError::UnprocessableEntity(format!("Invalid item name: {}", err))
    }
}
