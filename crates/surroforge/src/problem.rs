//! Problem entry point that wires domain, ensemble and constraints together.

use surroforge_config::{ConfigError, ProblemConfig, DEFAULT_TOLERANCE};
use surroforge_core::{
    CandidateValues, Constraints, EnsembleComposer, Feature, Inputs, Outputs, PreprocessingSpec,
    Result,
};
use tracing::info;

/// A problem domain with an ensemble and constraints known to fit it.
///
/// Holds only combinations that passed both the ensemble compatibility check
/// and the constraint key check.
#[derive(Debug, Clone)]
pub struct Problem<F, P> {
    inputs: Inputs<F>,
    outputs: Outputs<F>,
    ensemble: EnsembleComposer<F, P>,
    constraints: Constraints,
    tolerance: f64,
}

impl<F: Feature, P: PreprocessingSpec> Problem<F, P> {
    /// Checks `ensemble` and `constraints` against the domain.
    pub fn try_new(
        inputs: Inputs<F>,
        outputs: Outputs<F>,
        ensemble: EnsembleComposer<F, P>,
        constraints: Constraints,
    ) -> Result<Self> {
        ensemble.check_compatible(&inputs, &outputs)?;
        constraints.check_against(&inputs)?;
        info!(
            event = "problem_ready",
            inputs = inputs.len() as u64,
            outputs = outputs.len() as u64,
            models = ensemble.len() as u64,
            constraints = constraints.len() as u64,
        );
        Ok(Self {
            inputs,
            outputs,
            ensemble,
            constraints,
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    /// Builds constraints and tolerance from `config`, then checks as
    /// [`Problem::try_new`] does.
    pub fn from_config(
        inputs: Inputs<F>,
        outputs: Outputs<F>,
        ensemble: EnsembleComposer<F, P>,
        config: &ProblemConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validation.validate()?;
        let constraints = config.constraints()?;
        let mut problem = Self::try_new(inputs, outputs, ensemble, constraints)?;
        problem.tolerance = config.validation.tolerance;
        Ok(problem)
    }

    pub fn inputs(&self) -> &Inputs<F> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Outputs<F> {
        &self.outputs
    }

    pub fn ensemble(&self) -> &EnsembleComposer<F, P> {
        &self.ensemble
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if every constraint one point can decide holds.
    pub fn is_feasible<C: CandidateValues + ?Sized>(&self, candidate: &C) -> Result<bool> {
        self.constraints.is_fulfilled(candidate, self.tolerance)
    }
}
