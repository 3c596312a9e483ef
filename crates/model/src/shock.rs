use serde::{Deserialize, Serialize};
use sfm_core::constraint::{Constrained, StrictlyPositive};

use crate::{CountryId, ParameterError, World};

/// A strictly positive scaling factor.
pub type Factor = Constrained<f64, StrictlyPositive>;

/// A country parameter a shock can scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    ManufacturingProductivity,
    AgricultureProductivity,
    Capital,
    Land,
    Labor,
}

/// The countries a shock applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Both,
    Home,
    Foreign,
}

impl Target {
    /// Returns true if the shock applies to `id`.
    #[must_use]
    pub fn includes(self, id: CountryId) -> bool {
        match self {
            Target::Both => true,
            Target::Home => id == CountryId::Home,
            Target::Foreign => id == CountryId::Foreign,
        }
    }
}

/// A proportional change to one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShockFields")]
pub struct Shock {
    pub name: String,
    pub parameter: Parameter,
    pub factor: Factor,
    pub target: Target,
}

/// Unvalidated shock as written in a scenario file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShockFields {
    name: String,
    parameter: Parameter,
    factor: f64,
    #[serde(default)]
    target: Target,
}

impl TryFrom<ShockFields> for Shock {
    type Error = ParameterError;

    fn try_from(fields: ShockFields) -> Result<Self, ParameterError> {
        Self::new(fields.name, fields.parameter, fields.factor, fields.target)
    }
}

impl Shock {
    /// Creates a shock multiplying `parameter` by `factor` in `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `factor` is not finite and strictly positive.
    pub fn new(
        name: impl Into<String>,
        parameter: Parameter,
        factor: f64,
        target: Target,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            name: name.into(),
            parameter,
            factor: ParameterError::check::<StrictlyPositive>("shock factor", factor)?,
            target,
        })
    }

    /// Returns a new world with the shock applied. `world` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a scaled parameter fails validation.
    pub fn apply(&self, world: &World) -> Result<World, ParameterError> {
        let factor = self.factor.into_inner();
        world.try_map(|id, country| {
            if self.target.includes(id) {
                country.scaled(self.parameter, factor)
            } else {
                Ok(*country)
            }
        })
    }
}
