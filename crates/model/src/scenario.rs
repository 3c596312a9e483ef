use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    Comparison, Countries, Country, Endowments, Equilibrium, ParameterError, Sectors, Settings,
    Shock, SolveError, Target, World, equilibrium, shock::Parameter,
};

/// Parameters, solver settings, and shocks for one comparative-statics run.
///
/// Scenarios are usually read from TOML:
///
/// ```toml
/// [home]
/// technology = { manufacturing = 1.0, agriculture = 1.0 }
/// endowments = { capital = 4.0, land = 3.0, labor = 5.0 }
/// cost_share = 0.4
/// expenditure_share = 0.5
///
/// [foreign]
/// # same keys as [home]
///
/// [solver]            # optional
/// tolerance = 1e-8
///
/// [[shocks]]          # zero or more
/// name = "manufacturing productivity +20%"
/// parameter = "manufacturing_productivity"
/// factor = 1.2
/// target = "both"     # or "home" / "foreign"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub home: Country,
    pub foreign: Country,
    #[serde(default)]
    pub solver: Settings,
    #[serde(default)]
    pub shocks: Vec<Shock>,
}

/// Errors from loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from one shocked run.
#[derive(Debug, Error)]
pub enum ShockError {
    #[error("shocked parameters are invalid: {0}")]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// The outcome of one shock.
#[derive(Debug)]
pub struct ShockReport {
    pub shock: Shock,
    pub outcome: Result<Comparison, ShockError>,
}

/// The baseline equilibrium and the outcome of every shock.
#[derive(Debug)]
pub struct Report {
    pub baseline: Equilibrium,
    pub shocks: Vec<ShockReport>,
}

impl Scenario {
    /// The reference two-country parameter set with a 20% manufacturing
    /// productivity gain in both countries.
    ///
    /// Home is relatively capital abundant (K = 4, T = 3) and Foreign is
    /// relatively land abundant (K = 2, T = 1). Both have five workers.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in parameters fail validation.
    pub fn reference() -> Result<Self, ParameterError> {
        let country = |capital, land| {
            Country::new(
                Sectors::new(1.0, 1.0),
                Endowments::new(capital, land, 5.0)?,
                0.4,
                0.5,
            )
        };

        Ok(Self {
            home: country(4.0, 3.0)?,
            foreign: country(2.0, 1.0)?,
            solver: Settings::default(),
            shocks: vec![Shock::new(
                "manufacturing productivity +20%",
                Parameter::ManufacturingProductivity,
                1.2,
                Target::Both,
            )?],
        })
    }

    /// Parses a scenario from TOML.
    ///
    /// Parameter constraint violations are reported as parse errors.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the text is not a valid scenario.
    pub fn from_toml(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded scenario file");
        Self::from_toml(&text)
    }

    /// Returns the baseline world.
    #[must_use]
    pub fn world(&self) -> World {
        Countries::new(self.home, self.foreign)
    }

    /// Solves the baseline, then each shock independently.
    ///
    /// A failed shock is recorded in its [`ShockReport`] and does not affect
    /// the others.
    ///
    /// # Errors
    ///
    /// Returns an error if the baseline cannot be solved.
    pub fn run(&self) -> Result<Report, SolveError> {
        let world = self.world();
        let baseline = equilibrium::solve(&world, &self.solver)?;

        let shocks = self
            .shocks
            .iter()
            .map(|shock| {
                let outcome = self.run_shock(&world, baseline, shock);
                if let Err(error) = &outcome {
                    warn!(shock = %shock.name, %error, "shocked scenario failed");
                }
                ShockReport {
                    shock: shock.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(Report { baseline, shocks })
    }

    fn run_shock(
        &self,
        world: &World,
        baseline: Equilibrium,
        shock: &Shock,
    ) -> Result<Comparison, ShockError> {
        let shocked_world = shock.apply(world)?;
        let shocked = equilibrium::solve(&shocked_world, &self.solver)?;
        Ok(Comparison::new(baseline, shocked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::CountryId;

    const REFERENCE: &str = r#"
        [home]
        technology = { manufacturing = 1.0, agriculture = 1.0 }
        endowments = { capital = 4.0, land = 3.0, labor = 5.0 }
        cost_share = 0.4
        expenditure_share = 0.5

        [foreign]
        technology = { manufacturing = 1.0, agriculture = 1.0 }
        endowments = { capital = 2.0, land = 1.0, labor = 5.0 }
        cost_share = 0.4
        expenditure_share = 0.5

        [[shocks]]
        name = "manufacturing productivity +20%"
        parameter = "manufacturing_productivity"
        factor = 1.2
    "#;

    #[test]
    fn parses_reference_toml() {
        let scenario = Scenario::from_toml(REFERENCE).unwrap();
        assert_eq!(scenario, Scenario::reference().unwrap());
    }

    #[test]
    fn constraint_violations_are_parse_errors() {
        let text = REFERENCE.replacen("cost_share = 0.4", "cost_share = 1.4", 1);
        let err = Scenario::from_toml(&text).unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));

        let text = REFERENCE.replacen("land = 3.0", "land = -3.0", 1);
        assert!(Scenario::from_toml(&text).is_err());
    }

    #[test]
    fn infinite_parameters_are_parse_errors() {
        let text = REFERENCE.replacen("capital = 4.0", "capital = inf", 1);
        let err = Scenario::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("invalid capital: value must be finite"));

        let text = REFERENCE.replacen("factor = 1.2", "factor = inf", 1);
        assert!(Scenario::from_toml(&text).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{REFERENCE}\n[extra]\nvalue = 1\n");
        assert!(Scenario::from_toml(&text).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Scenario::load("no/such/scenario.toml").unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
        assert!(err.to_string().contains("no/such/scenario.toml"));
    }

    #[test]
    fn reference_run() {
        let report = Scenario::reference().unwrap().run().unwrap();
        assert_relative_eq!(report.baseline.price(), 0.833_808, epsilon = 1e-6);
        assert_eq!(report.shocks.len(), 1);

        let comparison = report.shocks[0].outcome.as_ref().unwrap();
        assert_relative_eq!(comparison.shocked().price(), 0.694_840, epsilon = 1e-6);
        assert!(comparison.price().percent() < 0.0);
        for id in CountryId::ALL {
            assert_relative_eq!(comparison.labor_moved_to_manufacturing(id), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn failed_shock_does_not_affect_others() {
        let mut scenario = Scenario::reference().unwrap();
        // Land overflows to infinity, so the shocked world is rejected before solving.
        let flood = Shock::new("land overflow", Parameter::Land, 1e308, Target::Home).unwrap();
        scenario.shocks.insert(0, flood);

        let report = scenario.run().unwrap();
        assert_eq!(report.shocks.len(), 2);
        assert!(matches!(
            report.shocks[0].outcome,
            Err(ShockError::Parameters(_))
        ));
        assert!(report.shocks[1].outcome.is_ok());
    }
}
