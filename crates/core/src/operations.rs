//! The four arithmetic operations the calculator dispatches to.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Add two numbers
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Subtract `b` from `a`
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Multiply two numbers
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Divide `a` by `b`, failing on a zero divisor
pub fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(Error::DivideByZero);
    }
    Ok(a / b)
}

/// Arithmetic operation tag as it appears in commands and history records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

crate::impl_case_insensitive_deserialize!(
    Operation,
    Add => "add",
    Subtract => "subtract",
    Multiply => "multiply",
    Divide => "divide",
);

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Lowercase tag used as the registry key and the history tag
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }

    /// Left fold over `operands`: `((x0 op x1) op x2) ...`
    pub fn reduce(self, operands: &[f64]) -> Result<f64> {
        let Some((first, rest)) = operands.split_first() else {
            return Err(Error::InvalidArgument(format!(
                "{} requires at least one operand",
                self.name()
            )));
        };
        rest.iter().try_fold(*first, |acc, &x| self.apply(acc, x))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}
