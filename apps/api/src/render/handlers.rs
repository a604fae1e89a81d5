//! Axum route handlers for laying out and exporting stored worksheets.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::handlers::find_worksheet;
use crate::layout::{layout, ExportItem, PageLayout, SERIF_METRICS};
use crate::models::worksheet::Worksheet;
use crate::render::svg::serialize_pages;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Selection key held by the caller: which problem of which variant.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SelectedProblem {
    pub variant_number: u32,
    pub display_index: u32,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub selected: Vec<SelectedProblem>,
    /// One page per variant instead of all variants on one page.
    #[serde(default)]
    pub split_by_variant: bool,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub problem_count: usize,
    pub pages: Vec<PageLayout>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub problem_count: usize,
    pub page_count: usize,
    pub svg: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/worksheets/:id/layout
///
/// Returns the positioned drawing primitives for the selected problems.
pub async fn handle_layout(
    State(state): State<AppState>,
    Path(worksheet_id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let worksheet = find_worksheet(&state, worksheet_id).await?;
    let items = resolve_selection(&worksheet, &request.selected)?;
    let pages = layout(
        &items,
        &state.page_config,
        &SERIF_METRICS,
        request.split_by_variant,
    );

    Ok(Json(LayoutResponse {
        problem_count: items.len(),
        pages,
    }))
}

/// POST /api/v1/worksheets/:id/export
///
/// Lays out the selected problems and returns the SVG markup. Multiple pages
/// are separated by a blank line.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(worksheet_id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let worksheet = find_worksheet(&state, worksheet_id).await?;
    let items = resolve_selection(&worksheet, &request.selected)?;
    let pages = layout(
        &items,
        &state.page_config,
        &SERIF_METRICS,
        request.split_by_variant,
    );
    let svg = serialize_pages(&pages);

    info!(
        %worksheet_id,
        problems = items.len(),
        pages = pages.len(),
        bytes = svg.len(),
        "worksheet exported"
    );

    Ok(Json(ExportResponse {
        problem_count: items.len(),
        page_count: pages.len(),
        svg,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Resolves selection keys against the stored worksheet.
///
/// Duplicate keys collapse to one problem. An empty selection is an
/// InvalidSelection; a key naming a problem that does not exist is a
/// Validation error.
pub(crate) fn resolve_selection(
    worksheet: &Worksheet,
    selected: &[SelectedProblem],
) -> Result<Vec<ExportItem>, AppError> {
    if selected.is_empty() {
        return Err(AppError::InvalidSelection("no problems selected".to_string()));
    }

    let keys: BTreeSet<(u32, u32)> = selected
        .iter()
        .map(|s| (s.variant_number, s.display_index))
        .collect();

    keys.into_iter()
        .map(|(variant_number, display_index)| {
            worksheet
                .find_problem(variant_number, display_index)
                .map(|problem| ExportItem {
                    variant_number,
                    display_index,
                    problem: *problem,
                })
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "Variant {variant_number} has no problem {display_index}"
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::number::NumberValue;
    use crate::models::problem::{OperationMode, Operator, Problem, Topic, Variant};

    fn worksheet() -> Worksheet {
        let problem = |value| Problem {
            left: NumberValue::Whole { value },
            operator: Operator::Add,
            right: NumberValue::fraction(1, 2),
        };
        Worksheet::new(
            vec![Topic::FractionsAddSub],
            OperationMode::Auto,
            vec![
                Variant {
                    variant_number: 1,
                    problems: (1..=5).map(problem).collect(),
                },
                Variant {
                    variant_number: 2,
                    problems: (6..=8).map(problem).collect(),
                },
            ],
        )
    }

    fn key(variant_number: u32, display_index: u32) -> SelectedProblem {
        SelectedProblem {
            variant_number,
            display_index,
        }
    }

    #[test]
    fn test_resolve_empty_selection_is_invalid() {
        let err = resolve_selection(&worksheet(), &[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidSelection(_)));
    }

    #[test]
    fn test_resolve_returns_stored_problems() {
        let items = resolve_selection(&worksheet(), &[key(2, 2), key(1, 4)]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].variant_number, items[0].display_index), (1, 4));
        assert_eq!(items[0].problem.left, NumberValue::Whole { value: 4 });
        assert_eq!((items[1].variant_number, items[1].display_index), (2, 2));
        assert_eq!(items[1].problem.left, NumberValue::Whole { value: 7 });
    }

    #[test]
    fn test_resolve_collapses_duplicates() {
        let items = resolve_selection(&worksheet(), &[key(1, 1), key(1, 1)]).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_problem_is_validation_error() {
        let err = resolve_selection(&worksheet(), &[key(2, 9)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = resolve_selection(&worksheet(), &[key(3, 1)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
