//! World markets for the two goods.
//!
//! The free functions evaluate world aggregates directly. [`Market`] bundles a
//! full evaluation at one price and is the output of the [`World`] model, which
//! the equilibrium solver drives through [`MarketClearing`].

use sfm_core::{
    EquationProblem, Model,
    constraint::{ConstraintError, StrictlyPositive},
};

use crate::{
    Countries, CountryState, RelativePrice, World,
    error::{DomainError, Quantity, checked_div},
};

/// Returns the relative world supply `Σ Y_M / Σ Y_A`.
///
/// # Errors
///
/// Fails if any country's output is undefined, or with
/// [`DomainError::DivisionByZero`] if the world produces no agricultural good.
pub fn relative_world_supply(world: &World, price: RelativePrice) -> Result<f64, DomainError> {
    let output = world.try_map(|_, country| country.output(price))?;
    checked_div(
        Quantity::RelativeSupply,
        output.sum(|o| o.manufacturing),
        output.sum(|o| o.agriculture),
        price.into_inner(),
    )
}

/// Returns the relative world demand `Σ Q_M / Σ Q_A`.
///
/// # Errors
///
/// Fails if any country's demand is undefined, or with
/// [`DomainError::DivisionByZero`] if the world demands no agricultural good.
pub fn relative_world_demand(world: &World, price: RelativePrice) -> Result<f64, DomainError> {
    let demand = world.try_map(|_, country| country.demand(price))?;
    checked_div(
        Quantity::RelativeDemand,
        demand.sum(|q| q.manufacturing),
        demand.sum(|q| q.agriculture),
        price.into_inner(),
    )
}

/// Returns the excess demand `RS − RD`, the function whose root is the
/// equilibrium price.
///
/// For the usual parameter sets it increases with `price`: a higher price
/// pulls labor into manufacturing and shifts spending toward agriculture.
///
/// # Errors
///
/// See [`relative_world_supply`] and [`relative_world_demand`].
pub fn excess_demand(world: &World, price: RelativePrice) -> Result<f64, DomainError> {
    Ok(relative_world_supply(world, price)? - relative_world_demand(world, price)?)
}

/// A full evaluation of both countries and world markets at one price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Market {
    pub price: RelativePrice,
    pub countries: Countries<CountryState>,
    pub relative_supply: f64,
    pub relative_demand: f64,
}

impl Market {
    /// Evaluates `world` at `price`.
    ///
    /// # Errors
    ///
    /// Returns the first domain error from either country or the world ratios.
    pub fn evaluate(world: &World, price: RelativePrice) -> Result<Self, DomainError> {
        let p = price.into_inner();
        let countries = world.try_map(|_, country| country.state(price))?;

        let relative_supply = checked_div(
            Quantity::RelativeSupply,
            countries.sum(|s| s.output.manufacturing),
            countries.sum(|s| s.output.agriculture),
            p,
        )?;
        let relative_demand = checked_div(
            Quantity::RelativeDemand,
            countries.sum(|s| s.demand.manufacturing),
            countries.sum(|s| s.demand.agriculture),
            p,
        )?;

        Ok(Self {
            price,
            countries,
            relative_supply,
            relative_demand,
        })
    }

    /// Returns `RS − RD`.
    #[must_use]
    pub fn excess_demand(&self) -> f64 {
        self.relative_supply - self.relative_demand
    }
}

impl Model for World {
    type Input = RelativePrice;
    type Output = Market;
    type Error = DomainError;

    fn call(&self, price: &RelativePrice) -> Result<Market, DomainError> {
        Market::evaluate(self, *price)
    }
}

/// Clears world markets: the residual is the excess demand at a price.
///
/// Solver variables that are not strictly positive are rejected before the
/// model is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketClearing;

impl EquationProblem<1> for MarketClearing {
    type Input = RelativePrice;
    type Output = Market;
    type Error = ConstraintError;

    fn input(&self, x: &[f64; 1]) -> Result<RelativePrice, ConstraintError> {
        StrictlyPositive::new(x[0])
    }

    fn residuals(&self, _input: &RelativePrice, market: &Market) -> Result<[f64; 1], ConstraintError> {
        Ok([market.excess_demand()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use sfm_solvers::equation::{EvalError, evaluate};

    use crate::{Country, Endowments, Sectors};

    fn reference_world() -> World {
        let country = |capital, land| {
            Country::new(
                Sectors::new(1.0, 1.0),
                Endowments::new(capital, land, 5.0).unwrap(),
                0.4,
                0.5,
            )
            .unwrap()
        };
        Countries::new(country(4.0, 3.0), country(2.0, 1.0))
    }

    fn price(p: f64) -> RelativePrice {
        StrictlyPositive::new(p).unwrap()
    }

    #[test]
    fn excess_demand_samples() {
        let world = reference_world();
        for (p, expected) in [(0.1, -9.95), (0.5, -1.439), (1.0, 0.571), (2.0, 3.914), (4.0, 12.21)] {
            assert_relative_eq!(
                excess_demand(&world, price(p)).unwrap(),
                expected,
                max_relative = 1e-2
            );
        }
    }

    #[test]
    fn excess_demand_increases_with_price() {
        let world = reference_world();
        let mut previous = f64::NEG_INFINITY;
        for step in 1..=400 {
            let p = f64::from(step) * 0.01;
            let ed = excess_demand(&world, price(p)).unwrap();
            assert!(ed > previous, "not increasing at p = {p}");
            previous = ed;
        }
    }

    #[test]
    fn market_matches_free_functions() {
        let world = reference_world();
        let p = price(0.9);
        let market = world.call(&p).unwrap();

        assert_relative_eq!(market.relative_supply, relative_world_supply(&world, p).unwrap());
        assert_relative_eq!(market.relative_demand, relative_world_demand(&world, p).unwrap());
        assert_relative_eq!(market.excess_demand(), excess_demand(&world, p).unwrap());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let world = reference_world();
        let p = price(0.833_808_422_088_623);
        assert_eq!(world.call(&p).unwrap(), world.call(&p).unwrap());
    }

    #[test]
    fn countries_are_interchangeable_in_aggregates() {
        let world = reference_world();
        let swapped = Countries::new(world.foreign, world.home);
        let p = price(1.3);
        assert_relative_eq!(
            excess_demand(&world, p).unwrap(),
            excess_demand(&swapped, p).unwrap()
        );
    }

    #[test]
    fn no_agriculture_anywhere_is_a_domain_error() {
        // Zero labor everywhere leaves nothing to produce either good.
        let idle = Country::new(
            Sectors::new(1.0, 1.0),
            Endowments::new(1.0, 1.0, 0.0).unwrap(),
            0.4,
            0.5,
        )
        .unwrap();
        let world = Countries::new(idle, idle);

        assert_eq!(
            relative_world_supply(&world, price(1.0)),
            Err(DomainError::DivisionByZero {
                quantity: Quantity::RelativeSupply,
                price: 1.0
            })
        );
    }

    #[test]
    fn problem_rejects_non_positive_prices() {
        let world = reference_world();
        let result = evaluate(&world, &MarketClearing, [0.0]);
        assert!(matches!(result, Err(EvalError::Problem(ConstraintError::Zero))));

        let eval = evaluate(&world, &MarketClearing, [1.0]).unwrap();
        assert_relative_eq!(eval.residuals[0], 0.571, max_relative = 1e-2);
    }
}
