use serde::{Deserialize, Serialize};

use crate::models::number::NumberValue;

/// Arithmetic operator of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];
    pub const ADD_SUB: [Operator; 2] = [Operator::Add, Operator::Subtract];
    pub const MUL_DIV: [Operator; 2] = [Operator::Multiply, Operator::Divide];

    /// Printed glyph.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }
}

/// Problem category: constrains operand shapes and the default operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    FractionsAddSub,
    MixedAddSub,
    FractionsMul,
    MixedMul,
    FractionsDiv,
    MixedDiv,
}

impl Topic {
    /// Operators used when the operation mode is `Auto`.
    pub fn default_operators(&self) -> &'static [Operator] {
        match self {
            Topic::FractionsAddSub | Topic::MixedAddSub => &Operator::ADD_SUB,
            Topic::FractionsMul | Topic::MixedMul => &[Operator::Multiply],
            Topic::FractionsDiv | Topic::MixedDiv => &[Operator::Divide],
        }
    }

    pub fn uses_mixed_numbers(&self) -> bool {
        matches!(self, Topic::MixedAddSub | Topic::MixedMul | Topic::MixedDiv)
    }
}

/// Override for which operators are eligible, regardless of topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    #[default]
    Auto,
    All,
    AddSubOnly,
    MulDivOnly,
}

impl OperationMode {
    pub fn operators_for(&self, topic: Topic) -> &'static [Operator] {
        match self {
            OperationMode::Auto => topic.default_operators(),
            OperationMode::All => &Operator::ALL,
            OperationMode::AddSubOnly => &Operator::ADD_SUB,
            OperationMode::MulDivOnly => &Operator::MUL_DIV,
        }
    }
}

/// `left operator right`. Always well-formed: `−` never goes negative, `÷` never by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub left: NumberValue,
    pub operator: Operator,
    pub right: NumberValue,
}

/// One worksheet. The display index of a problem is its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub variant_number: u32,
    pub problems: Vec<Problem>,
}

impl Variant {
    /// Looks up a problem by its 1-based display index.
    pub fn problem_at(&self, display_index: u32) -> Option<&Problem> {
        let position = usize::try_from(display_index).ok()?.checked_sub(1)?;
        self.problems.get(position)
    }
}
