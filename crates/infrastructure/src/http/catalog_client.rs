//! reqwest-based client for the `/items` API

use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{Item, ItemDetails, ItemId, Price};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::chaos::ChaosStats;
use crate::retry::{RetryConfig, RetryOutcome, Retryable, with_retry_notify};

/// Header name for request correlation ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Errors returned by [`CatalogClient`]
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// Connection, timeout or protocol failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unexpected HTTP status
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// The requested item does not exist
    #[error("Item not found")]
    NotFound,

    /// The response body could not be understood
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl Retryable for CatalogClientError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status(code) => *code >= 500,
            Self::NotFound | Self::Decode(_) => false,
        }
    }
}

/// Client settings
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Service root, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Backoff applied to `list_items`
    pub retry: RetryConfig,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

/// Liveness response of the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDto {
    id: Uuid,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    created_date: DateTime<Utc>,
}

impl TryFrom<ItemDto> for Item {
    type Error = CatalogClientError;

    fn try_from(dto: ItemDto) -> Result<Self, Self::Error> {
        let price = Price::new(dto.price).map_err(|e| CatalogClientError::Decode(e.to_string()))?;
        let details = ItemDetails::new(dto.name, dto.description, price)
            .map_err(|e| CatalogClientError::Decode(e.to_string()))?;
        Ok(Self::restore(
            ItemId::from_uuid(dto.id),
            details,
            dto.created_date,
        ))
    }
}

#[derive(Debug, Serialize)]
struct ItemRequest<'a> {
    name: &'a str,
    description: &'a str,
    price: Decimal,
}

impl<'a> From<&'a ItemDetails> for ItemRequest<'a> {
    fn from(details: &'a ItemDetails) -> Self {
        Self {
            name: details.name(),
            description: details.description(),
            price: details.price().amount(),
        }
    }
}

/// HTTP client for the catalog service
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    retry: RetryConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("play-catalog-cli/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, CatalogClientError> {
        let request_id = Uuid::now_v7();
        debug!(%request_id, "Sending catalog request");
        let response = request
            .header(X_REQUEST_ID, request_id.to_string())
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(CatalogClientError::NotFound),
            status => Err(CatalogClientError::Status(status.as_u16())),
        }
    }

    async fn decode_item(response: Response) -> Result<Item, CatalogClientError> {
        let dto: ItemDto = response
            .json()
            .await
            .map_err(|e| CatalogClientError::Decode(e.to_string()))?;
        Item::try_from(dto)
    }

    /// Single attempt at `GET /items`
    #[instrument(skip(self))]
    pub async fn fetch_items(&self) -> Result<Vec<Item>, CatalogClientError> {
        let response = self.send(self.http.get(self.url("/items"))).await?;
        let dtos: Vec<ItemDto> = response
            .json()
            .await
            .map_err(|e| CatalogClientError::Decode(e.to_string()))?;
        dtos.into_iter().map(Item::try_from).collect()
    }

    /// `GET /items`, retried on server and transport errors
    pub async fn list_items(&self) -> RetryOutcome<Vec<Item>, CatalogClientError> {
        self.list_items_notify(|_, _, _| {}).await
    }

    /// `GET /items` with a callback before every backoff sleep
    pub async fn list_items_notify<N>(
        &self,
        on_retry: N,
    ) -> RetryOutcome<Vec<Item>, CatalogClientError>
    where
        N: FnMut(u32, &CatalogClientError, Duration),
    {
        with_retry_notify(&self.retry, || self.fetch_items(), on_retry).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &ItemId) -> Result<Item, CatalogClientError> {
        let response = self
            .send(self.http.get(self.url(&format!("/items/{id}"))))
            .await?;
        Self::decode_item(response).await
    }

    #[instrument(skip(self, details), fields(name = %details.name()))]
    pub async fn create_item(&self, details: &ItemDetails) -> Result<Item, CatalogClientError> {
        let request = self
            .http
            .post(self.url("/items"))
            .json(&ItemRequest::from(details));
        let response = self.send(request).await?;
        Self::decode_item(response).await
    }

    #[instrument(skip(self, details))]
    pub async fn update_item(
        &self,
        id: &ItemId,
        details: &ItemDetails,
    ) -> Result<(), CatalogClientError> {
        let request = self
            .http
            .put(self.url(&format!("/items/{id}")))
            .json(&ItemRequest::from(details));
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &ItemId) -> Result<(), CatalogClientError> {
        self.send(self.http.delete(self.url(&format!("/items/{id}"))))
            .await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus, CatalogClientError> {
        let response = self.send(self.http.get(self.url("/health"))).await?;
        response
            .json()
            .await
            .map_err(|e| CatalogClientError::Decode(e.to_string()))
    }

    /// Fault injection counters; `NotFound` when chaos is disabled
    pub async fn chaos_stats(&self) -> Result<ChaosStats, CatalogClientError> {
        let response = self.send(self.http.get(self.url("/chaos/stats"))).await?;
        response
            .json()
            .await
            .map_err(|e| CatalogClientError::Decode(e.to_string()))
    }
}
