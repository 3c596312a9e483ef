use std::{fmt, ops::Index};

use serde::{Deserialize, Serialize};

/// Identifies one of the two countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryId {
    Home,
    Foreign,
}

impl CountryId {
    /// Both countries in iteration order.
    pub const ALL: [CountryId; 2] = [CountryId::Home, CountryId::Foreign];
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryId::Home => f.write_str("Home"),
            CountryId::Foreign => f.write_str("Foreign"),
        }
    }
}

/// A value for each country.
///
/// Iteration always visits Home, then Foreign. World aggregates are sums over
/// both entries and do not depend on that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Countries<T> {
    pub home: T,
    pub foreign: T,
}

impl<T> Countries<T> {
    pub fn new(home: T, foreign: T) -> Self {
        Self { home, foreign }
    }

    /// Returns the value for `id`.
    pub fn get(&self, id: CountryId) -> &T {
        match id {
            CountryId::Home => &self.home,
            CountryId::Foreign => &self.foreign,
        }
    }

    /// Iterates over `(id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CountryId, &T)> {
        CountryId::ALL.into_iter().map(|id| (id, self.get(id)))
    }

    /// Applies `f` to each country.
    pub fn map<U>(&self, mut f: impl FnMut(CountryId, &T) -> U) -> Countries<U> {
        Countries {
            home: f(CountryId::Home, &self.home),
            foreign: f(CountryId::Foreign, &self.foreign),
        }
    }

    /// Applies a fallible `f` to each country, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(CountryId, &T) -> Result<U, E>,
    ) -> Result<Countries<U>, E> {
        Ok(Countries {
            home: f(CountryId::Home, &self.home)?,
            foreign: f(CountryId::Foreign, &self.foreign)?,
        })
    }

    /// Sums `f` over both countries.
    pub fn sum(&self, mut f: impl FnMut(&T) -> f64) -> f64 {
        self.iter().map(|(_, value)| f(value)).sum()
    }
}

impl<T> Index<CountryId> for Countries<T> {
    type Output = T;

    fn index(&self, id: CountryId) -> &T {
        self.get(id)
    }
}
