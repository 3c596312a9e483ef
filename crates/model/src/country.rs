use serde::{Deserialize, Serialize};
use sfm_core::constraint::{Constrained, NonNegative, OpenUnitInterval, StrictlyPositive};

use crate::{
    RelativePrice, Sectors,
    error::{DomainError, ParameterError, Quantity, checked_div, finite},
    shock::Parameter,
};

/// A sector's total factor productivity.
pub type Productivity = Constrained<f64, StrictlyPositive>;

/// A quantity of capital, land, or labor.
pub type Endowment = Constrained<f64, NonNegative>;

/// A share strictly between zero and one.
pub type Share = Constrained<f64, OpenUnitInterval>;

/// A country's factor endowments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EndowmentFields")]
pub struct Endowments {
    capital: Endowment,
    land: Endowment,
    labor: Endowment,
}

impl Endowments {
    /// Creates endowments from non-negative quantities.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first negative, infinite, or NaN endowment.
    pub fn new(capital: f64, land: f64, labor: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            capital: ParameterError::check::<NonNegative>("capital", capital)?,
            land: ParameterError::check::<NonNegative>("land", land)?,
            labor: ParameterError::check::<NonNegative>("labor", labor)?,
        })
    }

    /// Capital, specific to manufacturing.
    #[must_use]
    pub fn capital(&self) -> f64 {
        self.capital.into_inner()
    }

    /// Land, specific to agriculture.
    #[must_use]
    pub fn land(&self) -> f64 {
        self.land.into_inner()
    }

    /// Labor, mobile between sectors.
    #[must_use]
    pub fn labor(&self) -> f64 {
        self.labor.into_inner()
    }
}

/// Unvalidated endowments as written in a scenario file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EndowmentFields {
    capital: f64,
    land: f64,
    labor: f64,
}

impl TryFrom<EndowmentFields> for Endowments {
    type Error = ParameterError;

    fn try_from(fields: EndowmentFields) -> Result<Self, ParameterError> {
        Self::new(fields.capital, fields.land, fields.labor)
    }
}

/// Parameters describing one country.
///
/// A `Country` is an immutable value. Every quantity below is a pure function
/// of the country and a relative price `p`, the price of manufactures in units
/// of the agricultural good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CountryFields")]
pub struct Country {
    technology: Sectors<Productivity>,
    endowments: Endowments,
    cost_share: Share,
    expenditure_share: Share,
}

/// Unvalidated country parameters as written in a scenario file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CountryFields {
    technology: Sectors<f64>,
    endowments: Endowments,
    cost_share: f64,
    expenditure_share: f64,
}

impl TryFrom<CountryFields> for Country {
    type Error = ParameterError;

    fn try_from(fields: CountryFields) -> Result<Self, ParameterError> {
        Self::new(
            fields.technology,
            fields.endowments,
            fields.cost_share,
            fields.expenditure_share,
        )
    }
}

/// Every model quantity for one country at one relative price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryState {
    pub labor: Sectors<f64>,
    pub output: Sectors<f64>,
    pub income: f64,
    pub demand: Sectors<f64>,
}

impl Country {
    /// Creates a country.
    ///
    /// `cost_share` is the specific factor's share in each sector's production
    /// function. `expenditure_share` is the share of income spent on the
    /// agricultural good.
    ///
    /// # Errors
    ///
    /// Returns an error if a productivity is not finite and strictly positive
    /// or a share is not strictly between zero and one.
    pub fn new(
        technology: Sectors<f64>,
        endowments: Endowments,
        cost_share: f64,
        expenditure_share: f64,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            technology: Sectors {
                manufacturing: ParameterError::check::<StrictlyPositive>(
                    "manufacturing productivity",
                    technology.manufacturing,
                )?,
                agriculture: ParameterError::check::<StrictlyPositive>(
                    "agriculture productivity",
                    technology.agriculture,
                )?,
            },
            endowments,
            cost_share: ParameterError::check::<OpenUnitInterval>("cost share", cost_share)?,
            expenditure_share: ParameterError::check::<OpenUnitInterval>(
                "expenditure share",
                expenditure_share,
            )?,
        })
    }

    #[must_use]
    pub fn technology(&self) -> Sectors<f64> {
        self.technology.map(|z| z.into_inner())
    }

    #[must_use]
    pub fn endowments(&self) -> &Endowments {
        &self.endowments
    }

    #[must_use]
    pub fn cost_share(&self) -> f64 {
        self.cost_share.into_inner()
    }

    #[must_use]
    pub fn expenditure_share(&self) -> f64 {
        self.expenditure_share.into_inner()
    }

    /// Returns `L_M / L_A = (p · Z_M / Z_A)^(1/β) · (K / T)`.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::DivisionByZero`] if the country has no land.
    pub fn labor_allocation_ratio(&self, price: RelativePrice) -> Result<f64, DomainError> {
        let p = price.into_inner();
        let tech = self.technology();
        let endowments = &self.endowments;

        let factor_ratio = checked_div(
            Quantity::LaborAllocationRatio,
            endowments.capital(),
            endowments.land(),
            p,
        )?;
        let price_term = (p * tech.manufacturing / tech.agriculture).powf(1.0 / self.cost_share());

        finite(Quantity::LaborAllocationRatio, price_term * factor_ratio, p)
    }

    /// Splits the labor endowment between the two sectors.
    ///
    /// The two allocations always sum to the labor endowment.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Country::labor_allocation_ratio`].
    pub fn labor_allocation(&self, price: RelativePrice) -> Result<Sectors<f64>, DomainError> {
        let ratio = self.labor_allocation_ratio(price)?;
        let labor = self.endowments.labor();
        let manufacturing = finite(
            Quantity::ManufacturingLabor,
            ratio / (1.0 + ratio) * labor,
            price.into_inner(),
        )?;
        Ok(Sectors::new(manufacturing, labor - manufacturing))
    }

    /// Returns `L_M`.
    ///
    /// # Errors
    ///
    /// See [`Country::labor_allocation`].
    pub fn labor_in_manufacturing(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.labor_allocation(price)?.manufacturing)
    }

    /// Returns `L_A = L − L_M`.
    ///
    /// # Errors
    ///
    /// See [`Country::labor_allocation`].
    pub fn labor_in_agriculture(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.labor_allocation(price)?.agriculture)
    }

    /// Returns both sector outputs.
    ///
    /// # Errors
    ///
    /// Fails if the labor allocation is undefined or an output overflows.
    pub fn output(&self, price: RelativePrice) -> Result<Sectors<f64>, DomainError> {
        let labor = self.labor_allocation(price)?;
        self.output_with(labor, price.into_inner())
    }

    /// Returns `Y_M = Z_M · K^β · L_M^(1−β)`.
    ///
    /// # Errors
    ///
    /// See [`Country::output`].
    pub fn manufacturing_output(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.output(price)?.manufacturing)
    }

    /// Returns `Y_A = Z_A · T^β · L_A^(1−β)`.
    ///
    /// # Errors
    ///
    /// See [`Country::output`].
    pub fn agriculture_output(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.output(price)?.agriculture)
    }

    /// Returns `I = p · Y_M + Y_A`.
    ///
    /// # Errors
    ///
    /// See [`Country::output`].
    pub fn total_income(&self, price: RelativePrice) -> Result<f64, DomainError> {
        let output = self.output(price)?;
        self.income_with(output, price.into_inner())
    }

    /// Returns the demand for each good.
    ///
    /// # Errors
    ///
    /// See [`Country::total_income`].
    pub fn demand(&self, price: RelativePrice) -> Result<Sectors<f64>, DomainError> {
        let income = self.total_income(price)?;
        self.demand_with(income, price.into_inner())
    }

    /// Returns `Q_A = α · I`.
    ///
    /// # Errors
    ///
    /// See [`Country::total_income`].
    pub fn demand_for_agriculture(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.demand(price)?.agriculture)
    }

    /// Returns `Q_M = (1 − α) · I / p`.
    ///
    /// # Errors
    ///
    /// See [`Country::total_income`].
    pub fn demand_for_manufacturing(&self, price: RelativePrice) -> Result<f64, DomainError> {
        Ok(self.demand(price)?.manufacturing)
    }

    /// Returns the wage `w = (1 − β) · Z_A · (T / L_A)^β`, the marginal
    /// product of labor in agriculture.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::DivisionByZero`] if no labor works in
    /// agriculture.
    pub fn wage(&self, price: RelativePrice) -> Result<f64, DomainError> {
        let labor = self.labor_allocation(price)?;
        self.wage_with(labor, price.into_inner())
    }

    /// Evaluates every quantity at `price`.
    ///
    /// The wage is not part of the state; see [`Country::wage`].
    ///
    /// # Errors
    ///
    /// Returns the first domain error encountered.
    pub fn state(&self, price: RelativePrice) -> Result<CountryState, DomainError> {
        let p = price.into_inner();
        let labor = self.labor_allocation(price)?;
        let output = self.output_with(labor, p)?;
        let income = self.income_with(output, p)?;
        let demand = self.demand_with(income, p)?;

        Ok(CountryState {
            labor,
            output,
            income,
            demand,
        })
    }

    pub(crate) fn wage_with(&self, labor: Sectors<f64>, p: f64) -> Result<f64, DomainError> {
        let land_per_worker = checked_div(Quantity::Wage, self.endowments.land(), labor.agriculture, p)?;
        let wage = (1.0 - self.cost_share())
            * self.technology.agriculture.into_inner()
            * land_per_worker.powf(self.cost_share());
        finite(Quantity::Wage, wage, p)
    }

    /// Returns a copy with one parameter multiplied by `factor`.
    pub(crate) fn scaled(&self, parameter: Parameter, factor: f64) -> Result<Self, ParameterError> {
        let mut tech = self.technology();
        let mut capital = self.endowments.capital();
        let mut land = self.endowments.land();
        let mut labor = self.endowments.labor();

        match parameter {
            Parameter::ManufacturingProductivity => tech.manufacturing *= factor,
            Parameter::AgricultureProductivity => tech.agriculture *= factor,
            Parameter::Capital => capital *= factor,
            Parameter::Land => land *= factor,
            Parameter::Labor => labor *= factor,
        }

        Self::new(
            tech,
            Endowments::new(capital, land, labor)?,
            self.cost_share(),
            self.expenditure_share(),
        )
    }

    fn output_with(&self, labor: Sectors<f64>, p: f64) -> Result<Sectors<f64>, DomainError> {
        let beta = self.cost_share();
        let tech = self.technology();
        let endowments = &self.endowments;

        let manufacturing = tech.manufacturing
            * endowments.capital().powf(beta)
            * labor.manufacturing.powf(1.0 - beta);
        let agriculture =
            tech.agriculture * endowments.land().powf(beta) * labor.agriculture.powf(1.0 - beta);

        Ok(Sectors::new(
            finite(Quantity::ManufacturingOutput, manufacturing, p)?,
            finite(Quantity::AgricultureOutput, agriculture, p)?,
        ))
    }

    fn income_with(&self, output: Sectors<f64>, p: f64) -> Result<f64, DomainError> {
        finite(Quantity::Income, p * output.manufacturing + output.agriculture, p)
    }

    fn demand_with(&self, income: f64, p: f64) -> Result<Sectors<f64>, DomainError> {
        let alpha = self.expenditure_share();
        let manufacturing = checked_div(Quantity::ManufacturingDemand, (1.0 - alpha) * income, p, p)?;
        let agriculture = finite(Quantity::AgricultureDemand, alpha * income, p)?;
        Ok(Sectors::new(manufacturing, agriculture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use sfm_core::constraint::ConstraintError;

    use crate::InvalidValue;

    fn home() -> Country {
        Country::new(
            Sectors::new(1.0, 1.0),
            Endowments::new(4.0, 3.0, 5.0).unwrap(),
            0.4,
            0.5,
        )
        .unwrap()
    }

    fn price(p: f64) -> RelativePrice {
        StrictlyPositive::new(p).unwrap()
    }

    #[test]
    fn reference_home_at_equilibrium_price() {
        let country = home();
        let p = price(0.833_808_422_088_623);

        let labor = country.labor_allocation(p).unwrap();
        assert_relative_eq!(labor.manufacturing, 2.292_109_979_804_64, epsilon = 1e-9);
        assert_relative_eq!(labor.agriculture, 2.707_890_020_195_36, epsilon = 1e-9);
        assert_relative_eq!(
            country.labor_allocation_ratio(p).unwrap(),
            0.846_456_083_042_573_7,
            epsilon = 1e-9
        );

        let output = country.output(p).unwrap();
        assert_relative_eq!(output.manufacturing, 2.863_948_919_569_503, epsilon = 1e-9);
        assert_relative_eq!(output.agriculture, 2.821_156_085_245_497, epsilon = 1e-9);

        assert_relative_eq!(country.wage(p).unwrap(), 0.625_096_897_777_705, epsilon = 1e-9);
    }

    #[test]
    fn labor_is_conserved() {
        let country = home();
        for p in [1e-3, 0.1, 0.5, 0.8338, 1.0, 2.0, 10.0, 1e3] {
            let labor = country.labor_allocation(price(p)).unwrap();
            assert_relative_eq!(labor.total(), 5.0, epsilon = 1e-12);
            assert!(labor.manufacturing >= 0.0);
            assert!(labor.agriculture >= 0.0);
        }
    }

    #[test]
    fn income_and_demand_are_consistent() {
        let country = home();
        let p = price(1.5);
        let output = country.output(p).unwrap();
        let income = country.total_income(p).unwrap();
        assert_relative_eq!(income, 1.5 * output.manufacturing + output.agriculture);

        let demand = country.demand(p).unwrap();
        assert_relative_eq!(demand.agriculture, 0.5 * income);
        assert_relative_eq!(demand.manufacturing, 0.5 * income / 1.5);
        assert_relative_eq!(
            1.5 * demand.manufacturing + demand.agriculture,
            income,
            epsilon = 1e-12
        );
    }

    #[test]
    fn state_matches_individual_quantities() {
        let country = home();
        let p = price(0.7);
        let state = country.state(p).unwrap();

        assert_eq!(state.labor, country.labor_allocation(p).unwrap());
        assert_eq!(state.output, country.output(p).unwrap());
        assert_relative_eq!(state.income, country.total_income(p).unwrap());
        assert_relative_eq!(
            state.demand.manufacturing,
            country.demand_for_manufacturing(p).unwrap()
        );
        assert_relative_eq!(state.demand.agriculture, country.demand_for_agriculture(p).unwrap());
    }

    #[test]
    fn zero_land_is_a_domain_error() {
        let country = Country::new(
            Sectors::new(1.0, 1.0),
            Endowments::new(4.0, 0.0, 5.0).unwrap(),
            0.4,
            0.5,
        )
        .unwrap();
        let p = price(1.0);

        let expected = DomainError::DivisionByZero {
            quantity: Quantity::LaborAllocationRatio,
            price: 1.0,
        };
        assert_eq!(country.labor_allocation_ratio(p), Err(expected));
        assert_eq!(country.wage(p), Err(expected));
        assert_eq!(country.agriculture_output(p), Err(expected));
    }

    #[test]
    fn zero_labor_gives_zero_output_and_undefined_wage() {
        let country = Country::new(
            Sectors::new(1.0, 1.0),
            Endowments::new(4.0, 3.0, 0.0).unwrap(),
            0.4,
            0.5,
        )
        .unwrap();
        let p = price(1.0);

        let output = country.output(p).unwrap();
        assert_relative_eq!(output.manufacturing, 0.0);
        assert_relative_eq!(output.agriculture, 0.0);
        assert!(matches!(
            country.wage(p),
            Err(DomainError::DivisionByZero {
                quantity: Quantity::Wage,
                ..
            })
        ));
    }

    #[test]
    fn extreme_price_overflows() {
        let country = Country::new(
            Sectors::new(1.0, 1.0),
            Endowments::new(4.0, 3.0, 5.0).unwrap(),
            0.01,
            0.5,
        )
        .unwrap();

        assert!(matches!(
            country.labor_allocation_ratio(price(1e10)),
            Err(DomainError::NonFinite {
                quantity: Quantity::LaborAllocationRatio,
                ..
            })
        ));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let endowments = Endowments::new(1.0, 1.0, 1.0).unwrap();

        let err = Country::new(Sectors::new(0.0, 1.0), endowments, 0.4, 0.5).unwrap_err();
        assert_eq!(err.parameter, "manufacturing productivity");
        assert_eq!(err.source, InvalidValue::Constraint(ConstraintError::Zero));

        let err = Country::new(Sectors::new(1.0, 1.0), endowments, 1.0, 0.5).unwrap_err();
        assert_eq!(err.parameter, "cost share");

        let err = Endowments::new(1.0, -2.0, 1.0).unwrap_err();
        assert_eq!(err.parameter, "land");
        assert_eq!(err.source, InvalidValue::Constraint(ConstraintError::Negative));

        let err = Endowments::new(f64::INFINITY, 1.0, 1.0).unwrap_err();
        assert_eq!(err.parameter, "capital");
        assert_eq!(err.source, InvalidValue::Infinite);

        let err = Country::new(Sectors::new(1.0, f64::INFINITY), endowments, 0.4, 0.5).unwrap_err();
        assert_eq!(err.parameter, "agriculture productivity");
        assert_eq!(err.source, InvalidValue::Infinite);
    }

    #[test]
    fn scaling_produces_a_new_country() {
        let country = home();
        let shocked = country.scaled(Parameter::ManufacturingProductivity, 1.2).unwrap();

        assert_relative_eq!(shocked.technology().manufacturing, 1.2);
        assert_relative_eq!(country.technology().manufacturing, 1.0);

        let fewer_workers = country.scaled(Parameter::Labor, 0.5).unwrap();
        assert_relative_eq!(fewer_workers.endowments().labor(), 2.5);
        assert_relative_eq!(fewer_workers.endowments().land(), 3.0);
    }
}
