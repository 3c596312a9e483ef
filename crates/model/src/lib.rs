//! The two-country Specific Factors trade model.
//!
//! Each country produces a manufactured good from capital and labor and an
//! agricultural good from land and labor. Labor moves freely between sectors
//! within a country; capital and land are specific to their sector. The
//! agricultural good is the numeraire, so the only free variable is the
//! relative price of manufactures.
//!
//! - [`Country`] and [`World`] hold immutable parameters
//! - [`Country`] methods and the functions in [`market`] evaluate the model at
//!   a [`RelativePrice`]
//! - [`equilibrium::solve`] finds the market-clearing price
//! - [`Shock`] and [`Comparison`] run comparative statics
//! - [`Scenario`] loads parameters, solver settings, and shocks from TOML
//!
//! # Example
//!
//! ```
//! use sfm_model::{Scenario, equilibrium};
//!
//! let scenario = Scenario::reference().unwrap();
//! let eq = equilibrium::solve(&scenario.world(), &scenario.solver).unwrap();
//! assert!((eq.price() - 0.8338).abs() < 1e-3);
//! ```

pub mod equilibrium;
pub mod market;

mod countries;
mod country;
mod error;
mod scenario;
mod sectors;
mod shock;
mod statics;

pub use countries::{CountryId, Countries};
pub use country::{Country, CountryState, Endowment, Endowments, Productivity, Share};
pub use equilibrium::{CountryEquilibrium, Equilibrium, Settings, SolveError};
pub use error::{DomainError, InvalidValue, ParameterError, Quantity};
pub use market::{Market, MarketClearing};
pub use scenario::{Report, Scenario, ScenarioError, ShockError, ShockReport};
pub use sectors::Sectors;
pub use shock::{Factor, Parameter, Shock, Target};
pub use statics::{Change, Comparison, CountryChanges, Summary};

use sfm_core::constraint::{Constrained, StrictlyPositive};

/// The price of the manufactured good in units of the agricultural good.
pub type RelativePrice = Constrained<f64, StrictlyPositive>;

/// Parameters for both countries.
pub type World = Countries<Country>;
