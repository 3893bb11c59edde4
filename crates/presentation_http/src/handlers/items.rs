//! Catalog item handlers
//!
//! REST endpoints for creating, reading, updating and deleting items.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use domain::{Item, ItemDetails, ItemId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Highest accepted item price
pub const MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

// ---------------------------------------------------------------------------
// Response / request DTOs
// ---------------------------------------------------------------------------

/// A catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "6f1c2d4e-8a3b-4c5d-9e6f-0a1b2c3d4e5f",
    "name": "Potion",
    "description": "Restores a small amount of HP",
    "price": 5.0,
    "createdDate": "2024-03-01T12:00:00Z"
}))]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().as_uuid(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: item.price().amount(),
            created_date: item.created_date(),
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Potion",
    "description": "Restores a small amount of HP",
    "price": 5.0
}))]
pub struct ItemRequest {
    /// Display name, 1 to 100 characters
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price between 0 and 1000
    #[validate(custom(function = "price_in_range"))]
    pub price: Decimal,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("must not be blank".into()));
    }
    Ok(())
}

fn price_in_range(value: &Decimal) -> Result<(), validator::ValidationError> {
    if (value.is_sign_negative() && !value.is_zero()) || *value > MAX_PRICE {
        return Err(validator::ValidationError::new("range")
            .with_message("must be between 0 and 1000".into()));
    }
    Ok(())
}

impl ItemRequest {
    fn into_details(self) -> Result<ItemDetails, ApiError> {
        let price = Price::new(self.price).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        ItemDetails::new(self.name, self.description, price)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

fn parse_id(raw: &str) -> Result<ItemId, ApiError> {
    ItemId::parse(raw).map_err(|_| ApiError::BadRequest(format!("Invalid item id: {raw}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All catalog items", body = Vec<ItemResponse>),
        (status = 500, description = "Store failure or injected fault")
    )
)]
#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.catalog.list_items().await?;
    debug!(count = items.len(), "Listed items");
    Ok(Json(items.iter().map(ItemResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "The item", body = ItemResponse),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found")
    )
)]
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = parse_id(&id)?;
    let item = state.catalog.get_item(&id).await?;
    Ok(Json(ItemResponse::from(&item)))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse,
            headers(("Location" = String, description = "URL of the new item"))),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.catalog.create_item(body.into_details()?).await?;
    info!(item_id = %item.id(), "Created item");

    let location = format!("/items/{}", item.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ItemResponse::from(&item)),
    ))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ItemRequest,
    responses(
        (status = 204, description = "Item updated"),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found")
    )
)]
#[instrument(skip(state, body))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ItemRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.catalog.update_item(&id, body.into_details()?).await?;
    info!(item_id = %id, "Updated item");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found")
    )
)]
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.catalog.delete_item(&id).await?;
    info!(item_id = %id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: Decimal) -> ItemRequest {
        ItemRequest {
            name: name.to_string(),
            description: String::new(),
            price,
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(request("Potion", Decimal::new(5, 0)).validate().is_ok());
        assert!(request("Free sample", Decimal::ZERO).validate().is_ok());
        assert!(request("Crown", MAX_PRICE).validate().is_ok());
    }

    #[test]
    fn blank_name_fails_validation() {
        assert!(request("", Decimal::ONE).validate().is_err());
        assert!(request("   ", Decimal::ONE).validate().is_err());
    }

    #[test]
    fn long_name_fails_validation() {
        assert!(request(&"x".repeat(101), Decimal::ONE).validate().is_err());
        assert!(request(&"x".repeat(100), Decimal::ONE).validate().is_ok());
    }

    #[test]
    fn price_outside_range_fails_validation() {
        assert!(request("Potion", Decimal::new(-1, 0)).validate().is_err());
        assert!(request("Potion", Decimal::new(100_001, 2)).validate().is_err());
    }

    #[test]
    fn malformed_id_is_bad_request() {
        assert!(matches!(parse_id("not-a-uuid"), Err(ApiError::BadRequest(_))));
        assert!(parse_id("6f1c2d4e-8a3b-4c5d-9e6f-0a1b2c3d4e5f").is_ok());
    }

    #[test]
    fn response_uses_camel_case() {
        let item = Item::new(ItemDetails::new("Potion", "Heals", Price::ZERO).unwrap());
        let json = serde_json::to_value(ItemResponse::from(&item)).unwrap();
        assert!(json.get("createdDate").is_some());
        assert!(json.get("created_date").is_none());
        assert_eq!(json["name"], "Potion");
    }
}
