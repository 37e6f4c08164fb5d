use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical drawing as loaded from a source file snapshot.
///
/// Fields that the source does not carry for a given era (or that fail to
/// parse for a single row) are simply absent; a `Draw` never aborts a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub game: String,
    /// Composed from the source's year/month/day columns; `None` when they
    /// do not form a valid calendar date.
    pub date: Option<NaiveDate>,
    /// The five main drawn numbers, domain 1-69.
    pub primary: [Option<u8>; 5],
    /// The supplementary drawn number, domain 1-26.
    pub secondary: Option<u8>,
    /// The multiplier flag; entirely absent for early-era records.
    pub power_play: Option<String>,
}

impl Draw {
    /// Iterate over the primary numbers that are actually present.
    pub fn primary_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.primary.iter().flatten().copied()
    }
}
