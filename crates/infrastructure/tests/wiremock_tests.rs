//! Integration tests for the catalog HTTP client and retry helpers
//!
//! Tests cover:
//! - Client behavior against a wiremock server replaying the warm-up pattern
//! - Retry delay properties

use std::time::Duration;

use domain::ItemId;
use infrastructure::{CatalogClient, CatalogClientConfig, CatalogClientError, RetryConfig};
use proptest::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_ID: &str = "0b7e9f3a-1c2d-4e5f-8a9b-c0d1e2f3a4b5";

fn client(server: &MockServer, retry: RetryConfig) -> CatalogClient {
    CatalogClient::new(CatalogClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        retry,
    })
    .unwrap()
}

// ============================================================================
// Catalog Client Tests
// ============================================================================

mod catalog_client_tests {
    use super::*;

    #[tokio::test]
    async fn list_survives_four_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(4)
            .expect(4)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, RetryConfig::new(1, 5, 5).without_jitter());
        let mut notified = Vec::new();
        let outcome = client
            .list_items_notify(|attempt, _, _| notified.push(attempt))
            .await;

        assert_eq!(outcome.attempts, 5);
        assert!(outcome.into_result().unwrap().is_empty());
        assert_eq!(notified, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn list_without_retries_reports_first_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client(&server, RetryConfig::none()).list_items().await;
        assert_eq!(outcome.attempts, 1);
        assert!(matches!(
            outcome.result,
            Err(CatalogClientError::Status(500))
        ));
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/items/{ITEM_ID}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let id = ItemId::parse(ITEM_ID).unwrap();
        let details = domain::ItemDetails::new(
            "Potion",
            "",
            domain::Price::new(rust_decimal::Decimal::ONE).unwrap(),
        )
        .unwrap();
        let result = client(&server, RetryConfig::none())
            .update_item(&id, &details)
            .await;
        assert!(matches!(result, Err(CatalogClientError::NotFound)));
    }

    #[tokio::test]
    async fn health_decodes_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "version": "0.3.0"})),
            )
            .mount(&server)
            .await;

        let health = client(&server, RetryConfig::none()).health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, "0.3.0");
    }

    #[tokio::test]
    async fn chaos_stats_tolerates_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chaos/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_calls": 5,
                "faults_injected": 4,
                "latency_injected": 2,
                "total_latency_added_ms": 4000,
                "next_phase": "stable",
                "fault_rate": 0.8
            })))
            .mount(&server)
            .await;

        let stats = client(&server, RetryConfig::none())
            .chaos_stats()
            .await
            .unwrap();
        assert_eq!(stats.faults_injected, 4);
        assert_eq!(stats.next_phase.as_deref(), Some("stable"));
    }

    #[tokio::test]
    async fn chaos_stats_disabled_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chaos/stats"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server, RetryConfig::none()).chaos_stats().await;
        assert!(matches!(result, Err(CatalogClientError::NotFound)));
    }
}

// ============================================================================
// Retry Property Tests
// ============================================================================

mod retry_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn delay_never_exceeds_max_without_jitter(
            initial in 1u64..5_000,
            max in 1u64..60_000,
            attempt in 0u32..64,
        ) {
            let config = RetryConfig::new(initial, max, 10).without_jitter();
            prop_assert!(config.delay_for_attempt(attempt) <= Duration::from_millis(max));
        }

        #[test]
        fn delay_is_monotonic_without_jitter(
            initial in 1u64..5_000,
            max in 1u64..60_000,
            attempt in 0u32..32,
        ) {
            let config = RetryConfig::new(initial, max, 10).without_jitter();
            prop_assert!(config.delay_for_attempt(attempt) <= config.delay_for_attempt(attempt + 1));
        }

        #[test]
        fn jitter_stays_within_factor(attempt in 0u32..8) {
            let config = RetryConfig::new(100, 10_000, 10);
            let base = config.clone().without_jitter().delay_for_attempt(attempt).as_millis();
            let jittered = config.delay_for_attempt(attempt).as_millis();
            let spread = base / 10 + 1;
            prop_assert!(jittered + spread >= base && jittered <= base + spread);
        }
    }
}
