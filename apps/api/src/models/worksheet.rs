use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::problem::{OperationMode, Problem, Topic, Variant};

/// One stored generation result. Replaced wholesale by the next generation, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub topics: Vec<Topic>,
    pub operation_mode: OperationMode,
    pub variants: Vec<Variant>,
}

impl Worksheet {
    pub fn new(topics: Vec<Topic>, operation_mode: OperationMode, variants: Vec<Variant>) -> Self {
        Worksheet {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            topics,
            operation_mode,
            variants,
        }
    }

    pub fn problem_count(&self) -> usize {
        self.variants.iter().map(|v| v.problems.len()).sum()
    }

    /// Resolves a `(variant_number, display_index)` selection key.
    pub fn find_problem(&self, variant_number: u32, display_index: u32) -> Option<&Problem> {
        self.variants
            .iter()
            .find(|v| v.variant_number == variant_number)
            .and_then(|v| v.problem_at(display_index))
    }
}
