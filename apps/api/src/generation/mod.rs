// Worksheet generation.
// Implements: constrained single-problem generation, variant planning, HTTP handlers.
// Randomness is always passed in, so tests drive it with a seeded StdRng.

pub mod generator;
pub mod handlers;
pub mod planner;

pub use generator::{GeneratorBounds, MAX_BOUND};
