use serde::{Deserialize, Serialize};

/// A value for each of the two sectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sectors<T> {
    pub manufacturing: T,
    pub agriculture: T,
}

impl<T> Sectors<T> {
    pub fn new(manufacturing: T, agriculture: T) -> Self {
        Self {
            manufacturing,
            agriculture,
        }
    }

    /// Applies `f` to both sectors.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Sectors<U> {
        Sectors {
            manufacturing: f(&self.manufacturing),
            agriculture: f(&self.agriculture),
        }
    }

    /// Combines two per-sector values sector by sector.
    pub fn zip_with<U, V>(&self, other: &Sectors<U>, mut f: impl FnMut(&T, &U) -> V) -> Sectors<V> {
        Sectors {
            manufacturing: f(&self.manufacturing, &other.manufacturing),
            agriculture: f(&self.agriculture, &other.agriculture),
        }
    }
}

impl Sectors<f64> {
    /// Returns the sum over both sectors.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.manufacturing + self.agriculture
    }
}
