//! The ordered set of expressions currently plotted.
//!
//! Insertion order is draw order: later expressions are stroked on top of
//! earlier ones. Duplicates are rejected by exact string match, and new
//! expressions are probed once with the evaluator before they are accepted.

#[cfg(test)]
#[path = "equations_test.rs"]
mod equations_test;

use crate::eval::{EvalError, Evaluator};

/// Why an expression was not added.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddError {
    #[error("expression already plotted: {0}")]
    Duplicate(String),
    #[error("expression rejected by evaluator: {0}")]
    Invalid(#[from] EvalError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationSet {
    exprs: Vec<String>,
}

impl EquationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `expr` if it is new and evaluates at `probe_x`.
    ///
    /// The probe is a single-point heuristic: an expression that only fails
    /// elsewhere is accepted and simply draws less at render time. A
    /// non-finite probe result (for example `1/x` at zero) is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AddError::Duplicate`] if `expr` is already present, or
    /// [`AddError::Invalid`] if the evaluator fails at `probe_x`.
    pub fn try_add(&mut self, expr: &str, evaluator: &dyn Evaluator, probe_x: f64) -> Result<(), AddError> {
        if self.contains(expr) {
            return Err(AddError::Duplicate(expr.to_owned()));
        }
        evaluator.evaluate(expr, probe_x)?;
        self.exprs.push(expr.to_owned());
        Ok(())
    }

    /// Boolean form of [`EquationSet::try_add`].
    pub fn add(&mut self, expr: &str, evaluator: &dyn Evaluator, probe_x: f64) -> bool {
        self.try_add(expr, evaluator, probe_x).is_ok()
    }

    /// Drop the most recently added expression. No-op when empty.
    pub fn remove_last(&mut self) -> Option<String> {
        self.exprs.pop()
    }

    pub fn clear(&mut self) {
        self.exprs.clear();
    }

    #[must_use]
    pub fn contains(&self, expr: &str) -> bool {
        self.exprs.iter().any(|e| e == expr)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Expressions in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exprs.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.exprs
    }
}
