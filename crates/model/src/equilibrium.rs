//! Solving for the market-clearing relative price.

use serde::{Deserialize, Serialize};
use sfm_core::Observer;
use sfm_observers::Trace;
use sfm_solvers::equation::bisection::{
    self, Action, Config, ConfigError, Event, ExpandConfig, Status,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    Countries, CountryId, DomainError, Market, MarketClearing, RelativePrice, Sectors, World,
};

/// Solver settings for an equilibrium search.
///
/// `tolerance` applies to both the residual and the bracket width.
/// `max_expansions` bounds each side of the bracket search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iters: usize,
    pub max_expansions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_guess: 1.0,
            tolerance: 1e-6,
            max_iters: 100,
            max_expansions: 64,
        }
    }
}

impl Settings {
    /// Returns the bisection config for these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn bisection(&self) -> Result<Config, ConfigError> {
        Config::with_tolerance(self.max_iters, self.tolerance)
    }

    /// Returns the bracket expansion config for these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the expansion config is invalid.
    pub fn expansion(&self) -> Result<ExpandConfig, ConfigError> {
        ExpandConfig::new(self.max_expansions, 2.0)
    }
}

/// Equilibrium quantities for one country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryEquilibrium {
    pub wage: f64,
    pub output: Sectors<f64>,
    pub labor: Sectors<f64>,
    pub income: f64,
}

/// A solved equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equilibrium {
    price: RelativePrice,
    countries: Countries<CountryEquilibrium>,
    relative_supply: f64,
    relative_demand: f64,
    iters: usize,
}

impl Equilibrium {
    /// Builds the equilibrium snapshot for `world` at `price`.
    fn at(world: &World, price: RelativePrice, iters: usize) -> Result<Self, DomainError> {
        let market = Market::evaluate(world, price)?;
        let countries = world.try_map(|id, country| {
            let state = market.countries[id];
            Ok::<_, DomainError>(CountryEquilibrium {
                wage: country.wage_with(state.labor, price.into_inner())?,
                output: state.output,
                labor: state.labor,
                income: state.income,
            })
        })?;

        Ok(Self {
            price,
            countries,
            relative_supply: market.relative_supply,
            relative_demand: market.relative_demand,
            iters,
        })
    }

    /// The equilibrium price of manufactures in units of the agricultural good.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price.into_inner()
    }

    #[must_use]
    pub fn countries(&self) -> &Countries<CountryEquilibrium> {
        &self.countries
    }

    #[must_use]
    pub fn country(&self, id: CountryId) -> &CountryEquilibrium {
        &self.countries[id]
    }

    /// Relative world output `Σ Y_M / Σ Y_A`.
    #[must_use]
    pub fn relative_world_output(&self) -> f64 {
        self.relative_supply
    }

    #[must_use]
    pub fn relative_world_demand(&self) -> f64 {
        self.relative_demand
    }

    /// Remaining excess demand at the solved price.
    #[must_use]
    pub fn excess_demand(&self) -> f64 {
        self.relative_supply - self.relative_demand
    }

    /// Real wages: `w` in units of the agricultural good and `w / p` in units
    /// of the manufactured good.
    #[must_use]
    pub fn real_wage(&self, id: CountryId) -> Sectors<f64> {
        let wage = self.countries[id].wage;
        Sectors::new(wage / self.price(), wage)
    }

    /// Bisection iterations used to find the price.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iters
    }
}

/// Errors from an equilibrium search.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid solver settings: {0}")]
    Settings(#[from] ConfigError),

    #[error("equilibrium search failed: {0}")]
    Solver(#[from] bisection::Error),

    #[error("search stopped before converging, last price {price}")]
    Stopped { price: f64 },

    #[error("equilibrium quantities are undefined: {0}")]
    Domain(#[from] DomainError),
}

/// Finds the market-clearing equilibrium of `world`.
///
/// Every solver evaluation is logged at `trace` level.
///
/// # Errors
///
/// See [`solve_observed`].
pub fn solve(world: &World, settings: &Settings) -> Result<Equilibrium, SolveError> {
    solve_observed(world, settings, Trace)
}

/// Finds the market-clearing equilibrium of `world`, reporting every solver
/// evaluation to `observer`.
///
/// The solver searches outward from `settings.initial_guess` for a bracket,
/// bisects it, and then evaluates the world once more at the root.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the search fails, the
/// observer stops the search before convergence, or a quantity is undefined
/// at the root.
pub fn solve_observed<Obs>(
    world: &World,
    settings: &Settings,
    observer: Obs,
) -> Result<Equilibrium, SolveError>
where
    Obs: for<'a> Observer<Event<'a, World, MarketClearing>, Action>,
{
    let expand_config = settings.expansion()?;
    let config = settings.bisection()?;

    let solution = bisection::find_root(
        world,
        &MarketClearing,
        settings.initial_guess,
        &expand_config,
        &config,
        observer,
    )?;

    debug!(
        price = solution.x,
        residual = solution.residual,
        iters = solution.iters,
        status = ?solution.status,
        "equilibrium search finished"
    );

    if solution.status != Status::Converged {
        return Err(SolveError::Stopped { price: solution.x });
    }

    let equilibrium = Equilibrium::at(world, solution.snapshot.input, solution.iters)?;
    info!(
        price = equilibrium.price(),
        iters = equilibrium.iters(),
        excess_demand = equilibrium.excess_demand(),
        "solved equilibrium"
    );

    Ok(equilibrium)
}
