//! Axum route handlers for the worksheet generation API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::planner::{distinct_topics, plan};
use crate::models::problem::{OperationMode, Topic, Variant};
use crate::models::worksheet::Worksheet;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_count() -> i64 {
    1
}

/// Body of `POST /api/v1/worksheets`. Counts outside their range are clamped.
#[derive(Debug, Deserialize)]
pub struct GenerateWorksheetRequest {
    pub topics: Vec<Topic>,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default = "default_count")]
    pub variant_count: i64,
    #[serde(default)]
    pub operation_mode: OperationMode,
}

#[derive(Debug, Serialize)]
pub struct WorksheetResponse {
    pub worksheet_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub topics: Vec<Topic>,
    pub operation_mode: OperationMode,
    pub problem_count: usize,
    pub variants: Vec<Variant>,
}

impl From<&Worksheet> for WorksheetResponse {
    fn from(worksheet: &Worksheet) -> Self {
        WorksheetResponse {
            worksheet_id: worksheet.id,
            created_at: worksheet.created_at,
            topics: worksheet.topics.clone(),
            operation_mode: worksheet.operation_mode,
            problem_count: worksheet.problem_count(),
            variants: worksheet.variants.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/worksheets
///
/// Generates a fresh set of variants and stores it for later export.
/// An empty topic list is an InvalidSelection and stores nothing.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateWorksheetRequest>,
) -> Result<Json<WorksheetResponse>, AppError> {
    // The thread-local RNG is not Send; it must be dropped before the next await.
    let variants = {
        let mut rng = rand::thread_rng();
        plan(
            &request.topics,
            request.count,
            request.variant_count,
            request.operation_mode,
            state.generator_bounds(),
            &mut rng,
        )?
    };

    let topics = distinct_topics(&request.topics);
    let worksheet = state
        .store
        .insert(Worksheet::new(topics, request.operation_mode, variants))
        .await;

    let stored = state.store.len().await;
    info!(
        worksheet_id = %worksheet.id,
        problems = worksheet.problem_count(),
        stored,
        "worksheet generated"
    );

    Ok(Json(WorksheetResponse::from(worksheet.as_ref())))
}

/// GET /api/v1/worksheets/:id
pub async fn handle_get_worksheet(
    State(state): State<AppState>,
    Path(worksheet_id): Path<Uuid>,
) -> Result<Json<WorksheetResponse>, AppError> {
    let worksheet = find_worksheet(&state, worksheet_id).await?;
    Ok(Json(WorksheetResponse::from(worksheet.as_ref())))
}

/// Looks up a stored worksheet or fails with `NotFound`.
pub async fn find_worksheet(
    state: &AppState,
    worksheet_id: Uuid,
) -> Result<Arc<Worksheet>, AppError> {
    state
        .store
        .get(worksheet_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Worksheet {worksheet_id} not found")))
}
