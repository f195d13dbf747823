//! Calculation records and the append-only history ledger.

use crate::command::format_number;
use crate::error::Result;
use crate::operations::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One performed arithmetic operation and its operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub a: f64,
    pub b: f64,
    pub operation: String,
}

impl Calculation {
    pub fn new(a: f64, b: f64, operation: impl Into<String>) -> Self {
        Self {
            a,
            b,
            operation: operation.into(),
        }
    }

    /// Re-evaluate the stored operands with the stored operation
    pub fn perform(&self) -> Result<f64> {
        // Tags are matched exactly; history never holds mixed-case tags
        let op = Operation::ALL
            .into_iter()
            .find(|op| op.name() == self.operation)
            .ok_or_else(|| crate::Error::UnknownOperation(self.operation.clone()))?;
        op.apply(self.a, self.b)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calculation({}, {}, {})",
            format_number(self.a),
            format_number(self.b),
            self.operation
        )
    }
}

/// Chronological record of calculations performed during a session.
///
/// Owned by the session that produces the records; there is no global
/// instance.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Calculation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, calculation: Calculation) {
        self.entries.push(calculation);
    }

    /// Copy of the complete history, oldest first
    pub fn entries(&self) -> Vec<Calculation> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Calculation> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Calculation> {
        self.entries.last()
    }

    pub fn find_by_operation(&self, operation: &str) -> Vec<Calculation> {
        self.entries
            .iter()
            .filter(|calc| calc.operation == operation)
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
