#![allow(clippy::float_cmp)]

use super::*;
use crate::expr::ExprEvaluator;

fn add_all(set: &mut EquationSet, exprs: &[&str]) {
    for expr in exprs {
        assert!(set.add(expr, &ExprEvaluator, 0.0), "'{expr}' was rejected");
    }
}

fn fails_at_zero(_: &str, x: f64) -> Result<f64, EvalError> {
    if x == 0.0 { Err(EvalError::Domain { function: "probe".to_owned(), value: x }) } else { Ok(x) }
}

// --- Add ---

#[test]
fn new_set_is_empty() {
    let set = EquationSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn add_valid_expression() {
    let mut set = EquationSet::new();
    assert_eq!(set.try_add("sin(x)", &ExprEvaluator, 0.0), Ok(()));
    assert_eq!(set.as_slice(), ["sin(x)"]);
}

#[test]
fn add_rejects_duplicate() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x^2"]);
    assert_eq!(set.try_add("x^2", &ExprEvaluator, 0.0), Err(AddError::Duplicate("x^2".to_owned())));
    assert_eq!(set.len(), 1);
}

#[test]
fn duplicate_is_checked_before_probe() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x"]);
    let err = set.try_add("x", &fails_at_zero, 0.0).unwrap_err();
    assert!(matches!(err, AddError::Duplicate(_)));
}

#[test]
fn duplicates_match_exact_text_only() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x", "x ", "1x"]);
    assert_eq!(set.len(), 3);
}

#[test]
fn add_rejects_expression_that_fails_probe() {
    let mut set = EquationSet::new();
    let err = set.try_add("y + 1", &ExprEvaluator, 0.0).unwrap_err();
    assert_eq!(err, AddError::Invalid(EvalError::UnknownSymbol("y".to_owned())));
    assert!(set.is_empty());
}

#[test]
fn add_rejects_syntax_error() {
    let mut set = EquationSet::new();
    assert!(!set.add("2 *", &ExprEvaluator, 0.0));
    assert!(set.is_empty());
}

#[test]
fn add_accepts_non_finite_probe_result() {
    let mut set = EquationSet::new();
    assert!(set.add("1/x", &ExprEvaluator, 0.0));
}

#[test]
fn probe_uses_given_x() {
    let mut set = EquationSet::new();
    assert!(!set.add("anything", &fails_at_zero, 0.0));
    assert!(set.add("anything", &fails_at_zero, 1.0));
}

#[test]
fn expression_failing_only_away_from_probe_is_accepted() {
    let mut set = EquationSet::new();
    assert!(set.add("sqrt(x)", &ExprEvaluator, 0.0));
}

#[test]
fn add_error_display() {
    let dup = AddError::Duplicate("x".to_owned());
    assert_eq!(dup.to_string(), "expression already plotted: x");
    let invalid = AddError::from(EvalError::UnknownFunction("foo".to_owned()));
    assert_eq!(invalid.to_string(), "expression rejected by evaluator: unknown function: foo");
}

// --- Order ---

#[test]
fn iteration_preserves_insertion_order() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x", "x^2", "sin(x)"]);
    assert_eq!(set.iter().collect::<Vec<_>>(), ["x", "x^2", "sin(x)"]);
}

#[test]
fn contains_reports_membership() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["cos(x)"]);
    assert!(set.contains("cos(x)"));
    assert!(!set.contains("sin(x)"));
}

// --- Remove / clear ---

#[test]
fn remove_last_pops_most_recent() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x", "x^2"]);
    assert_eq!(set.remove_last(), Some("x^2".to_owned()));
    assert_eq!(set.as_slice(), ["x"]);
}

#[test]
fn remove_last_on_empty_is_noop() {
    let mut set = EquationSet::new();
    assert_eq!(set.remove_last(), None);
    assert!(set.is_empty());
}

#[test]
fn removed_expression_can_be_added_again() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x"]);
    set.remove_last();
    assert!(set.add("x", &ExprEvaluator, 0.0));
}

#[test]
fn clear_empties_set() {
    let mut set = EquationSet::new();
    add_all(&mut set, &["x", "2x", "3x"]);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}
