//! The expression evaluator seam.
//!
//! The plotter never parses expressions itself: it hands the expression string
//! and a value for `x` to an [`Evaluator`] and gets back a number or an
//! [`EvalError`]. The built-in implementation lives in [`crate::expr`]; the
//! browser layer can substitute a host function (for example math.js) through
//! [`crate::web`].

#[cfg(test)]
#[path = "eval_test.rs"]
mod eval_test;

/// Why an expression could not be evaluated at a given `x`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity { name: String, expected: &'static str, got: usize },
    #[error("{function} is undefined at {value}")]
    Domain { function: String, value: f64 },
    #[error("host evaluator failed: {0}")]
    Host(String),
    #[error("expression did not produce a number")]
    NotANumber,
}

/// Evaluates an expression in one free variable `x`.
pub trait Evaluator {
    /// Evaluate `expr` with `x` bound to `x`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] for malformed expressions or when the
    /// expression is undefined at `x`. A finite or infinite `f64` result is
    /// not an error.
    fn evaluate(&self, expr: &str, x: f64) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, f64) -> Result<f64, EvalError>,
{
    fn evaluate(&self, expr: &str, x: f64) -> Result<f64, EvalError> {
        self(expr, x)
    }
}
