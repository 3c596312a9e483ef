//! Comparative statics: how an equilibrium moves when parameters change.

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{Countries, CountryId, Equilibrium, Sectors};

/// A quantity before and after a shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub baseline: f64,
    pub shocked: f64,
}

impl Change {
    pub fn new(baseline: f64, shocked: f64) -> Self {
        Self { baseline, shocked }
    }

    /// Returns `shocked − baseline`.
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.shocked - self.baseline
    }

    /// Returns `(shocked / baseline − 1) · 100`.
    ///
    /// A zero baseline gives an infinite or NaN percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.shocked / self.baseline - 1.0) * 100.0
    }
}

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Change", 3)?;
        state.serialize_field("baseline", &self.baseline)?;
        state.serialize_field("shocked", &self.shocked)?;
        state.serialize_field("percent", &self.percent())?;
        state.end()
    }
}

/// Changes for one country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryChanges {
    pub wage: Change,
    pub output: Sectors<Change>,
    pub labor: Sectors<Change>,
    pub real_wage: Sectors<Change>,
    pub labor_moved_to_manufacturing: f64,
}

/// Every change between two equilibria, flattened for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub price: Change,
    pub relative_world_output: Change,
    pub countries: Countries<CountryChanges>,
}

/// A baseline equilibrium paired with a shocked one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    baseline: Equilibrium,
    shocked: Equilibrium,
}

impl Comparison {
    pub fn new(baseline: Equilibrium, shocked: Equilibrium) -> Self {
        Self { baseline, shocked }
    }

    #[must_use]
    pub fn baseline(&self) -> &Equilibrium {
        &self.baseline
    }

    #[must_use]
    pub fn shocked(&self) -> &Equilibrium {
        &self.shocked
    }

    #[must_use]
    pub fn price(&self) -> Change {
        self.change(Equilibrium::price)
    }

    #[must_use]
    pub fn relative_world_output(&self) -> Change {
        self.change(Equilibrium::relative_world_output)
    }

    #[must_use]
    pub fn wage(&self, id: CountryId) -> Change {
        self.change(|eq| eq.country(id).wage)
    }

    #[must_use]
    pub fn output(&self, id: CountryId) -> Sectors<Change> {
        self.sectors(|eq| eq.country(id).output)
    }

    #[must_use]
    pub fn labor(&self, id: CountryId) -> Sectors<Change> {
        self.sectors(|eq| eq.country(id).labor)
    }

    #[must_use]
    pub fn real_wage(&self, id: CountryId) -> Sectors<Change> {
        self.sectors(|eq| eq.real_wage(id))
    }

    /// Workers who moved into manufacturing, `L_M,shocked − L_M,baseline`.
    ///
    /// Negative when labor moves into agriculture.
    #[must_use]
    pub fn labor_moved_to_manufacturing(&self, id: CountryId) -> f64 {
        self.labor(id).manufacturing.difference()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            price: self.price(),
            relative_world_output: self.relative_world_output(),
            countries: self.baseline.countries().map(|id, _| CountryChanges {
                wage: self.wage(id),
                output: self.output(id),
                labor: self.labor(id),
                real_wage: self.real_wage(id),
                labor_moved_to_manufacturing: self.labor_moved_to_manufacturing(id),
            }),
        }
    }

    fn change(&self, f: impl Fn(&Equilibrium) -> f64) -> Change {
        Change::new(f(&self.baseline), f(&self.shocked))
    }

    fn sectors(&self, f: impl Fn(&Equilibrium) -> Sectors<f64>) -> Sectors<Change> {
        f(&self.baseline).zip_with(&f(&self.shocked), |b, s| Change::new(*b, *s))
    }
}
