//! Configuration system for SurroForge.
//!
//! Load validation settings and constraint descriptors from TOML or YAML.
//! Every constraint is converted through the core's validating constructors,
//! so a loaded configuration never yields an invalid constraint.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use surroforge_config::ProblemConfig;
//!
//! let config = ProblemConfig::from_toml_str(r#"
//!     [validation]
//!     tolerance = 1e-4
//!
//!     [[constraints]]
//!     type = "linear_equality"
//!     features = ["x1", "x2"]
//!     coefficients = [1.0, 1.0]
//!     rhs = 1.0
//!
//!     [[constraints]]
//!     type = "n_choose_k"
//!     features = ["x1", "x2", "x3"]
//!     min_count = 1
//!     max_count = 2
//!     none_also_valid = false
//! "#).unwrap();
//!
//! assert_eq!(config.validation.tolerance, 1e-4);
//! assert_eq!(config.constraints().unwrap().len(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use surroforge_config::ProblemConfig;
//!
//! let config = ProblemConfig::load("problem.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use surroforge_core::{Constraint, Constraints, Sign, ValidationError};
use thiserror::Error;
use tracing::debug;


/// Default absolute tolerance for fulfillment checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Constraint {index}: {source}")]
    Constraint {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Main problem configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProblemConfig {
    /// Numeric settings for fulfillment checks.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Constraint descriptors, in declaration order.
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

impl ProblemConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// carries invalid settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validated()
    }

    /// Sets the fulfillment tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.validation.tolerance = tolerance;
        self
    }

    /// Adds a constraint configuration.
    pub fn with_constraint(mut self, constraint: ConstraintConfig) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Builds every configured constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] naming the first constraint that
    /// fails validation.
    pub fn constraints(&self) -> Result<Constraints, ConfigError> {
        let built = self
            .constraints
            .iter()
            .enumerate()
            .map(|(index, c)| c.build().map_err(|source| ConfigError::Constraint { index, source }))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(event = "constraints_loaded", constraints = built.len() as u64);
        Ok(Constraints::new(built))
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validation.validate()?;
        Ok(self)
    }
}

/// Numeric settings for fulfillment checks.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Absolute tolerance for equality and activity tests.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValidationConfig {
    /// Checks that the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )))
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_sign() -> i64 {
    1
}

/// Constraint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    LinearEquality(LinearConfig),
    LinearInequality(LinearConfig),
    ProductEquality(ProductConfig),
    ProductInequality(ProductConfig),
    NonlinearEquality(NonlinearConfig),
    NonlinearInequality(NonlinearConfig),
    NChooseK(NChooseKConfig),
    InterpointEquality(InterpointConfig),
}

impl ConstraintConfig {
    /// Converts this configuration into a validated constraint.
    pub fn build(&self) -> Result<Constraint, ValidationError> {
        match self {
            Self::LinearEquality(c) => {
                Constraint::linear_equality(c.features.clone(), c.coefficients.clone(), c.rhs)
            }
            Self::LinearInequality(c) => {
                Constraint::linear_inequality(c.features.clone(), c.coefficients.clone(), c.rhs)
            }
            Self::ProductEquality(c) => Constraint::product_equality(
                c.features.clone(),
                c.exponents.clone(),
                c.rhs,
                Sign::try_from(c.sign)?,
            ),
            Self::ProductInequality(c) => Constraint::product_inequality(
                c.features.clone(),
                c.exponents.clone(),
                c.rhs,
                Sign::try_from(c.sign)?,
            ),
            Self::NonlinearEquality(c) => Constraint::nonlinear_equality(
                c.expression.clone(),
                c.features.clone(),
                c.jacobian_expression.clone(),
                c.hessian_expression.clone(),
            ),
            Self::NonlinearInequality(c) => Constraint::nonlinear_inequality(
                c.expression.clone(),
                c.features.clone(),
                c.jacobian_expression.clone(),
                c.hessian_expression.clone(),
            ),
            Self::NChooseK(c) => Constraint::n_choose_k(
                c.features.clone(),
                c.min_count,
                c.max_count,
                c.none_also_valid,
            ),
            Self::InterpointEquality(c) => {
                Constraint::interpoint_equality(c.feature.clone(), c.multiplicity)
            }
        }
    }
}

/// Linear constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LinearConfig {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub rhs: f64,
}

/// Product constraint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductConfig {
    pub features: Vec<String>,
    pub exponents: Vec<f64>,
    pub rhs: f64,

    /// `1` or `-1`.
    #[serde(default = "default_sign")]
    pub sign: i64,
}

/// Nonlinear constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NonlinearConfig {
    pub expression: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub jacobian_expression: Option<String>,
    #[serde(default)]
    pub hessian_expression: Option<String>,
}

/// NChooseK constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NChooseKConfig {
    pub features: Vec<String>,
    pub min_count: usize,
    pub max_count: usize,
    #[serde(default)]
    pub none_also_valid: bool,
}

/// Interpoint equality constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InterpointConfig {
    pub feature: String,

    /// Points per group; the whole batch when absent.
    #[serde(default)]
    pub multiplicity: Option<usize>,
}
