//! Variant Planner — builds whole worksheets out of single generated problems.
//!
//! Out-of-range counts are clamped, never rejected. The only failure is an
//! empty topic selection, which is returned to the caller as a value.

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::generation::generator::{generate, GeneratorBounds};
use crate::models::problem::{OperationMode, Topic, Variant};

pub const MIN_PROBLEM_COUNT: usize = 1;
pub const MAX_PROBLEM_COUNT: usize = 120;
pub const MIN_VARIANT_COUNT: usize = 1;
pub const MAX_VARIANT_COUNT: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("select at least one topic")]
    NoTopicsSelected,
}

/// Clamps a requested problem count into `[1, 120]`.
pub fn clamp_problem_count(requested: i64) -> usize {
    clamp_into(requested, MIN_PROBLEM_COUNT, MAX_PROBLEM_COUNT)
}

/// Clamps a requested variant count into `[1, 12]`.
pub fn clamp_variant_count(requested: i64) -> usize {
    clamp_into(requested, MIN_VARIANT_COUNT, MAX_VARIANT_COUNT)
}

fn clamp_into(requested: i64, min: usize, max: usize) -> usize {
    usize::try_from(requested).map_or(min, |n| n.clamp(min, max))
}

/// Collapses repeated topics, keeping first-seen order.
pub fn distinct_topics(topics: &[Topic]) -> Vec<Topic> {
    let mut distinct: Vec<Topic> = Vec::with_capacity(topics.len());
    for topic in topics {
        if !distinct.contains(topic) {
            distinct.push(*topic);
        }
    }
    distinct
}

/// Generates `variant_count` variants of `count` problems each.
///
/// Each slot draws its topic uniformly from `topics`, so topics repeat freely
/// within and across variants.
pub fn plan<R: Rng + ?Sized>(
    topics: &[Topic],
    count: i64,
    variant_count: i64,
    mode: OperationMode,
    bounds: &GeneratorBounds,
    rng: &mut R,
) -> Result<Vec<Variant>, PlanError> {
    let topics = distinct_topics(topics);
    if topics.is_empty() {
        return Err(PlanError::NoTopicsSelected);
    }

    let count = clamp_problem_count(count);
    let variant_count = clamp_variant_count(variant_count);

    let variants: Vec<Variant> = (1..=variant_count)
        .map(|number| Variant {
            variant_number: number as u32,
            problems: (0..count)
                .map(|_| {
                    let topic = topics[rng.gen_range(0..topics.len())];
                    generate(topic, mode, bounds, rng)
                })
                .collect(),
        })
        .collect();

    info!(
        variants = variant_count,
        problems_per_variant = count,
        topics = topics.len(),
        ?mode,
        "planned worksheet"
    );

    Ok(variants)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
