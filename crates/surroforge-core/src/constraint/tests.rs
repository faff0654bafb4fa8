//! Tests for constraint descriptors.

use std::collections::{BTreeMap, HashMap};

use super::*;
use crate::error::ValidationErrorKind;
use crate::test_utils::features as domain;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn point(values: &[(&str, f64)]) -> HashMap<String, f64> {
    values.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_linear_arity() {
    for n in 0..5 {
        for m in 0..5 {
            let names: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
            let result = LinearConstraint::try_new(names, vec![1.0; m], 0.5);
            if n == m {
                assert!(result.is_ok(), "n = m = {n} should succeed");
            } else {
                let err = result.unwrap_err();
                assert_eq!(err.kind(), ValidationErrorKind::ArityMismatch);
            }
        }
    }
}

#[test]
fn test_linear_arity_message() {
    let err = Constraint::linear_inequality(keys(&["f1", "f2", "f3"]), vec![1.0, 2.0], 1.0)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::ArityMismatch {
            constraint: "LinearConstraint",
            values_name: "coefficients",
            features: 3,
            values: 2,
        }
    );
}

#[test]
fn test_linear_rejects_duplicate_feature() {
    let err = LinearConstraint::try_new(keys(&["f1", "f1"]), vec![1.0, 1.0], 1.0).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::DuplicateIdentifier);
}

#[test]
fn test_linear_rejects_nan() {
    let err = LinearConstraint::try_new(keys(&["f1"]), vec![f64::NAN], 1.0).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::InvalidValue);
    let err = LinearConstraint::try_new(keys(&["f1"]), vec![1.0], f64::INFINITY).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NonFinite {
            constraint: "LinearConstraint",
            field: "rhs",
        }
    );
}

#[test]
fn test_linear_fulfillment() {
    let eq = Constraint::linear_equality(keys(&["x", "y"]), vec![1.0, 2.0], 3.0).unwrap();
    let ineq = Constraint::linear_inequality(keys(&["x", "y"]), vec![1.0, 2.0], 3.0).unwrap();

    let on = point(&[("x", 1.0), ("y", 1.0)]);
    let below = point(&[("x", 0.0), ("y", 1.0)]);
    let above = point(&[("x", 2.0), ("y", 1.0)]);

    assert_eq!(eq.is_fulfilled(&on, 1e-9).unwrap(), Some(true));
    assert_eq!(eq.is_fulfilled(&below, 1e-9).unwrap(), Some(false));
    assert_eq!(ineq.is_fulfilled(&below, 1e-9).unwrap(), Some(true));
    assert_eq!(ineq.is_fulfilled(&on, 1e-9).unwrap(), Some(true));
    assert_eq!(ineq.is_fulfilled(&above, 1e-9).unwrap(), Some(false));
}

#[test]
fn test_missing_candidate_value() {
    let eq = Constraint::linear_equality(keys(&["x", "y"]), vec![1.0, 1.0], 1.0).unwrap();
    let err = eq.is_fulfilled(&point(&[("x", 1.0)]), 1e-6).unwrap_err();
    assert_eq!(err, ValidationError::MissingValue { key: "y".into() });
    assert_eq!(err.kind(), ValidationErrorKind::DomainMismatch);
}

#[test]
fn test_product_valid() {
    let c = Constraint::product_equality(keys(&["f1", "f2", "f3"]), vec![2.0, 3.0, 1.0], 0.4, Sign::Positive)
        .unwrap();
    assert_eq!(c.type_name(), "ProductEqualityConstraint");
    assert!(c.is_equality());
}

#[test]
fn test_product_arity() {
    let err = ProductConstraint::try_new(keys(&["f1", "f2"]), vec![1.0], 0.0, Sign::Positive)
        .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::ArityMismatch);
    assert!(err.to_string().contains("exponents"));
}

#[test]
fn test_sign_conversion() {
    assert_eq!(Sign::try_from(1).unwrap(), Sign::Positive);
    assert_eq!(Sign::try_from(-1).unwrap(), Sign::Negative);
    let err = Sign::try_from(0).unwrap_err();
    assert_eq!(err, ValidationError::InvalidSign(0));
    assert_eq!(err.kind(), ValidationErrorKind::InvalidValue);
    assert_eq!(i64::from(Sign::Negative), -1);
}

#[test]
fn test_product_sign_flips_inequality() {
    let x = point(&[("a", 2.0), ("b", 3.0)]);
    let positive =
        Constraint::product_inequality(keys(&["a", "b"]), vec![1.0, 1.0], 5.0, Sign::Positive)
            .unwrap();
    let negative =
        Constraint::product_inequality(keys(&["a", "b"]), vec![1.0, 1.0], -5.0, Sign::Negative)
            .unwrap();
    // 6 <= 5 fails; -6 <= -5 holds.
    assert_eq!(positive.is_fulfilled(&x, 1e-9).unwrap(), Some(false));
    assert_eq!(negative.is_fulfilled(&x, 1e-9).unwrap(), Some(true));
}

#[test]
fn test_product_exponents() {
    let c = ProductConstraint::try_new(keys(&["a", "b"]), vec![2.0, 0.5], 0.0, Sign::Positive)
        .unwrap();
    let lhs = c.lhs(&point(&[("a", 3.0), ("b", 4.0)])).unwrap();
    assert!((lhs - 18.0).abs() < 1e-12);
}

#[test]
fn test_nonlinear_valid() {
    let c = Constraint::nonlinear_inequality(
        "f1*f2",
        keys(&["f1", "f2", "f3"]),
        Some("[f2,f1,0]".into()),
        Some("[[0,1,0],[1,0,0],[0,0,0]]".into()),
    )
    .unwrap();
    assert!(!c.is_equality());
    assert_eq!(c.features().len(), 3);
    let Constraint::NonlinearInequality(inner) = &c else {
        panic!("expected nonlinear inequality");
    };
    assert_eq!(inner.expression(), "f1*f2");
    assert_eq!(inner.jacobian_expression(), Some("[f2,f1,0]"));
}

#[test]
fn test_nonlinear_requires_expression() {
    let err = NonlinearConstraint::try_new("  ", keys(&["f1"]), None, None).unwrap_err();
    assert_eq!(
        err,
        ValidationError::EmptyExpression {
            constraint: "NonlinearConstraint",
            field: "expression",
        }
    );
    let err = NonlinearConstraint::try_new("f1", keys(&["f1"]), Some(String::new()), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::EmptyExpression {
            field: "jacobian_expression",
            ..
        }
    ));
    let err = NonlinearConstraint::try_new("f1", Vec::new(), None, None).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::InvalidValue);
}

#[test]
fn test_nonlinear_not_judged_from_point() {
    let c = Constraint::nonlinear_equality("f1-1", keys(&["f1"]), None, None).unwrap();
    assert_eq!(c.is_fulfilled(&point(&[("f1", 1.0)]), 1e-6).unwrap(), None);
}

#[test]
fn test_n_choose_k_valid() {
    let c = Constraint::n_choose_k(keys(&["f1", "f2", "f3"]), 1, 1, false).unwrap();
    assert_eq!(c.type_name(), "NChooseKConstraint");
}

#[test]
fn test_n_choose_k_inverted_bounds() {
    let err = NChooseKConstraint::try_new(keys(&["f1", "f2", "f3"]), 2, 1, false).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
    assert_eq!(
        err,
        ValidationError::InvalidCount {
            min_count: 2,
            max_count: 1,
            features: 3,
        }
    );
}

#[test]
fn test_n_choose_k_max_above_feature_count() {
    let err = NChooseKConstraint::try_new(keys(&["f1", "f2"]), 0, 3, true).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
    assert!(NChooseKConstraint::try_new(keys(&["f1", "f2"]), 0, 2, true).is_ok());
    assert!(NChooseKConstraint::try_new(keys(&["f1", "f2"]), 2, 2, false).is_ok());
}

#[test]
fn test_n_choose_k_fulfillment() {
    let c = NChooseKConstraint::try_new(keys(&["a", "b", "c"]), 1, 2, false).unwrap();
    let none = point(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
    let one = point(&[("a", 0.3), ("b", 0.0), ("c", 0.0)]);
    let three = point(&[("a", 0.3), ("b", 0.1), ("c", 0.2)]);
    assert!(!c.is_fulfilled(&none, 1e-6).unwrap());
    assert!(c.is_fulfilled(&one, 1e-6).unwrap());
    assert!(!c.is_fulfilled(&three, 1e-6).unwrap());

    let lenient = NChooseKConstraint::try_new(keys(&["a", "b", "c"]), 1, 2, true).unwrap();
    assert!(lenient.is_fulfilled(&none, 1e-6).unwrap());
    assert_eq!(lenient.active_count(&three, 0.15).unwrap(), 2);
}

#[test]
fn test_interpoint_multiplicity_bounds() {
    let err = InterpointEqualityConstraint::try_new("f1", Some(1)).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
    let err = InterpointEqualityConstraint::try_new("f1", Some(0)).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::CardinalityViolation);
    assert!(InterpointEqualityConstraint::try_new("f1", Some(2)).is_ok());
    assert!(InterpointEqualityConstraint::try_new("f1", Some(3)).is_ok());
    assert!(InterpointEqualityConstraint::try_new("f1", None).is_ok());
}

#[test]
fn test_interpoint_batch() {
    let pairs = InterpointEqualityConstraint::try_new("f1", Some(2)).unwrap();
    assert!(pairs.is_fulfilled_batch(&[1.0, 1.0, 2.0, 2.0, 5.0], 1e-9));
    assert!(!pairs.is_fulfilled_batch(&[1.0, 1.0, 2.0, 2.5], 1e-9));
    assert!(pairs.is_fulfilled_batch(&[], 1e-9));

    let whole = InterpointEqualityConstraint::try_new("f1", None).unwrap();
    assert!(whole.is_fulfilled_batch(&[3.0, 3.0, 3.0], 1e-9));
    assert!(!whole.is_fulfilled_batch(&[3.0, 3.0, 3.1], 1e-9));

    let c = Constraint::InterpointEquality(pairs);
    assert_eq!(c.features(), &["f1".to_string()]);
    assert_eq!(c.is_fulfilled(&point(&[("f1", 1.0)]), 1e-9).unwrap(), None);
}

#[test]
fn test_constraints_check_against_domain() {
    let constraints = Constraints::from(vec![
        Constraint::linear_equality(keys(&["f1", "f2"]), vec![1.0, 1.0], 1.0).unwrap(),
        Constraint::n_choose_k(keys(&["f2", "f3"]), 0, 1, true).unwrap(),
    ]);
    assert!(constraints.check_against(&domain(&["f1", "f2", "f3"])).is_ok());

    let err = constraints.check_against(&domain(&["f1", "f2"])).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownConstraintFeature {
            constraint: 1,
            key: "f3".into(),
        }
    );
    assert_eq!(err.kind(), ValidationErrorKind::DomainMismatch);
}

#[test]
fn test_constraints_fulfillment() {
    let constraints = Constraints::new(vec![
        Constraint::linear_inequality(keys(&["a", "b"]), vec![1.0, 1.0], 1.0).unwrap(),
        Constraint::nonlinear_equality("a*b", keys(&["a", "b"]), None, None).unwrap(),
        Constraint::n_choose_k(keys(&["a", "b"]), 1, 1, false).unwrap(),
    ]);
    let mut candidate = BTreeMap::new();
    candidate.insert("a".to_string(), 0.5);
    candidate.insert("b".to_string(), 0.0);
    assert!(constraints.is_fulfilled(&candidate, 1e-6).unwrap());

    candidate.insert("b".to_string(), 0.25);
    assert!(!constraints.is_fulfilled(&candidate, 1e-6).unwrap());
    assert_eq!(constraints.len(), 3);
    assert_eq!(constraints.iter().filter(|c| c.is_equality()).count(), 1);
}
