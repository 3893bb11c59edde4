//! Fault injection statistics

use axum::{Json, extract::State};
use infrastructure::ChaosStats;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Counters reported by `GET /chaos/stats`
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "total_calls": 3,
    "faults_injected": 3,
    "latency_injected": 2,
    "total_latency_added_ms": 4000,
    "fault_rate": 1.0,
    "next_phase": "failing_fast"
}))]
pub struct ChaosStatsResponse {
    pub total_calls: u64,
    pub faults_injected: u64,
    pub latency_injected: u64,
    pub total_latency_added_ms: u64,
    pub fault_rate: f64,
    /// `warming`, `failing_fast` or `stable`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_phase: Option<String>,
}

impl From<ChaosStats> for ChaosStatsResponse {
    fn from(stats: ChaosStats) -> Self {
        Self {
            fault_rate: stats.actual_fault_rate(),
            total_calls: stats.total_calls,
            faults_injected: stats.faults_injected,
            latency_injected: stats.latency_injected,
            total_latency_added_ms: stats.total_latency_added_ms,
            next_phase: stats.next_phase,
        }
    }
}

#[utoipa::path(
    get,
    path = "/chaos/stats",
    tag = "chaos",
    responses(
        (status = 200, description = "Fault injection counters", body = ChaosStatsResponse),
        (status = 404, description = "Fault injection is disabled")
    )
)]
#[instrument(skip(state))]
pub async fn chaos_stats(
    State(state): State<AppState>,
) -> Result<Json<ChaosStatsResponse>, ApiError> {
    let chaos = state
        .chaos
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Fault injection is disabled".to_string()))?;
    Ok(Json(chaos.stats().into()))
}
