pub mod number;
pub mod problem;
pub mod worksheet;
