//! Nonlinear constraints over symbolic expressions.

use super::check_unique;
use crate::error::{Result, ValidationError};

const NAME: &str = "NonlinearConstraint";

/// A constraint given as symbolic expressions over `features`.
///
/// Expressions are opaque here; only their presence is checked. Parsing and
/// evaluation belong to the expression evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct NonlinearConstraint {
    expression: String,
    features: Vec<String>,
    jacobian_expression: Option<String>,
    hessian_expression: Option<String>,
}

impl NonlinearConstraint {
    /// Creates a nonlinear constraint.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyExpression`] for a blank expression
    /// - [`ValidationError::EmptyFeatures`] if `features` is empty
    /// - [`ValidationError::DuplicateKey`] if a feature repeats
    pub fn try_new(
        expression: impl Into<String>,
        features: Vec<String>,
        jacobian_expression: Option<String>,
        hessian_expression: Option<String>,
    ) -> Result<Self> {
        let expression = expression.into();
        require_text("expression", &expression)?;
        if let Some(jacobian) = &jacobian_expression {
            require_text("jacobian_expression", jacobian)?;
        }
        if let Some(hessian) = &hessian_expression {
            require_text("hessian_expression", hessian)?;
        }
        if features.is_empty() {
            return Err(ValidationError::EmptyFeatures { constraint: NAME });
        }
        check_unique(&features)?;
        Ok(Self {
            expression,
            features,
            jacobian_expression,
            hessian_expression,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn jacobian_expression(&self) -> Option<&str> {
        self.jacobian_expression.as_deref()
    }

    pub fn hessian_expression(&self) -> Option<&str> {
        self.hessian_expression.as_deref()
    }
}

fn require_text(field: &'static str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Err(ValidationError::EmptyExpression {
            constraint: NAME,
            field,
        })
    } else {
        Ok(())
    }
}
