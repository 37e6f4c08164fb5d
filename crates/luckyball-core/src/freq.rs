use serde::{Deserialize, Serialize};

use crate::draw::Draw;

/// Inclusive domain of the five main numbers.
pub const PRIMARY_MIN: u8 = 1;
pub const PRIMARY_MAX: u8 = 69;

/// Inclusive domain of the supplementary number.
pub const SECONDARY_MIN: u8 = 1;
pub const SECONDARY_MAX: u8 = 26;

/// A total mapping from every number in a fixed inclusive domain to its
/// observed draw count.
///
/// The backing vector is dense: every number in `min..=max` has an entry,
/// with zero for numbers never observed. Observations outside the domain
/// are dropped, matching the fixed game rules rather than the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    min: u8,
    max: u8,
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn new(min: u8, max: u8) -> Self {
        debug_assert!(min <= max, "empty frequency domain");
        Self {
            min,
            max,
            counts: vec![0; (max - min + 1) as usize],
        }
    }

    pub fn record(&mut self, number: u8) {
        if number < self.min || number > self.max {
            log::debug!("ignoring out-of-domain number {number}");
            return;
        }
        self.counts[(number - self.min) as usize] += 1;
    }

    pub fn count(&self, number: u8) -> u32 {
        if number < self.min || number > self.max {
            return 0;
        }
        self.counts[(number - self.min) as usize]
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Size of the domain, never zero.
    pub fn domain_len(&self) -> usize {
        self.counts.len()
    }

    /// Sampling weights in domain order: observed count plus one.
    ///
    /// The +1 floor keeps every number selectable, including numbers with
    /// zero historical occurrences.
    pub fn weights(&self) -> Vec<u32> {
        self.counts.iter().map(|count| count + 1).collect()
    }

    /// All numbers in the domain paired with their counts, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (self.min + i as u8, count))
    }
}

/// The two frequency tables one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequencies {
    pub primary: FrequencyTable,
    pub secondary: FrequencyTable,
}

/// Reduce a draw table to per-number frequencies.
///
/// Flattens the five primary fields across all records into one count over
/// 1-69 and counts the secondary field over 1-26. Absent fields contribute
/// nothing. Pure and deterministic.
pub fn analyze(draws: &[Draw]) -> Frequencies {
    let mut primary = FrequencyTable::new(PRIMARY_MIN, PRIMARY_MAX);
    let mut secondary = FrequencyTable::new(SECONDARY_MIN, SECONDARY_MAX);

    for draw in draws {
        for number in draw.primary_numbers() {
            primary.record(number);
        }
        if let Some(number) = draw.secondary {
            secondary.record(number);
        }
    }

    Frequencies { primary, secondary }
}
