//! Ensemble Check Example
//!
//! Composes two single-output surrogates for a solvent mixing problem,
//! checks them against the problem domain and loads mixture constraints
//! from `problem.toml`.
//!
//! Run from this directory with `cargo run`, or pass another config path as
//! the first argument.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;

use surroforge::prelude::*;
use surroforge::Result;

/// A domain feature of the mixing problem.
#[derive(Debug, Clone, PartialEq)]
enum MixFeature {
    Fraction(&'static str),
    Temperature { lower: f64, upper: f64 },
    Objective(&'static str),
}

impl Feature for MixFeature {
    fn key(&self) -> &str {
        match self {
            MixFeature::Fraction(key) | MixFeature::Objective(key) => key,
            MixFeature::Temperature { .. } => "temperature",
        }
    }
}

/// How a model scales an input.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scaling {
    Normalize,
    Standardize,
}

const SOLVENTS: [&str; 3] = ["water", "ethanol", "acetone"];

fn temperature() -> MixFeature {
    MixFeature::Temperature {
        lower: 20.0,
        upper: 80.0,
    }
}

fn surrogate(
    kind: SurrogateKind,
    output: &'static str,
    scaled: Scaling,
) -> Result<SingleModelDescriptor<MixFeature, Scaling>> {
    let mut inputs: Vec<MixFeature> = SOLVENTS.iter().copied().map(MixFeature::Fraction).collect();
    inputs.push(temperature());
    let specs: BTreeMap<String, Scaling> = [("temperature".to_string(), scaled)].into();
    SingleModelDescriptor::try_new(
        kind,
        Features::try_new(inputs)?,
        Features::try_new(vec![MixFeature::Objective(output)])?,
        specs,
    )
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    surroforge::console::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "problem.toml".to_string());
    let config = ProblemConfig::load(&path)?;

    let mut domain_inputs: Vec<MixFeature> =
        SOLVENTS.iter().copied().map(MixFeature::Fraction).collect();
    domain_inputs.push(temperature());
    let inputs = Features::try_new(domain_inputs)?;
    let outputs = Features::try_new(vec![
        MixFeature::Objective("yield"),
        MixFeature::Objective("cost"),
    ])?;

    // A mismatched scaling is rejected before any domain check.
    let rejected = EnsembleComposer::try_new(vec![
        surrogate(SurrogateKind::SingleTaskGp, "yield", Scaling::Normalize)?,
        surrogate(SurrogateKind::RandomForest, "cost", Scaling::Standardize)?,
    ]);
    if let Err(err) = &rejected {
        println!("rejected as {:?}: {}", err.kind(), err);
    }

    let ensemble = EnsembleComposer::try_new(vec![
        surrogate(SurrogateKind::SingleTaskGp, "yield", Scaling::Normalize)?,
        surrogate(SurrogateKind::RandomForest, "cost", Scaling::Normalize)?,
    ])?;
    let problem = Problem::from_config(inputs, outputs, ensemble, &config)?;

    let candidate: HashMap<String, f64> = [
        ("water".to_string(), 0.6),
        ("ethanol".to_string(), 0.4),
        ("acetone".to_string(), 0.0),
        ("temperature".to_string(), 45.0),
    ]
    .into();
    println!(
        "candidate {:?} feasible: {}",
        candidate,
        problem.is_feasible(&candidate)?
    );

    Ok(())
}
