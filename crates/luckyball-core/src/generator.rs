use std::collections::HashSet;

use rand::Rng;
use rand::distributions::{Distribution as _, WeightedIndex};

use crate::freq::Frequencies;
use crate::ticket::Ticket;

/// Draws tickets weighted by historical frequency.
///
/// Each domain value carries weight `count + 1`, so a number that has never
/// been drawn still has strictly positive selection probability. Primary
/// numbers are drawn with replacement and rejection-sampled until five
/// distinct values come up; the retry loop is uncapped, matching the
/// vanishingly small collision probability over 69 values.
pub struct WeightedGenerator {
    primary: WeightedIndex<u32>,
    primary_min: u8,
    secondary: WeightedIndex<u32>,
    secondary_min: u8,
}

impl WeightedGenerator {
    pub fn from_frequencies(freq: &Frequencies) -> anyhow::Result<Self> {
        let primary = WeightedIndex::new(freq.primary.weights())?;
        let secondary = WeightedIndex::new(freq.secondary.weights())?;
        Ok(Self {
            primary,
            primary_min: freq.primary.min(),
            secondary,
            secondary_min: freq.secondary.min(),
        })
    }

    /// Generate `count` independent tickets. Two tickets in the same call
    /// may be identical; there is no cross-ticket uniqueness guarantee.
    pub fn generate(&self, count: usize) -> Vec<Ticket> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(&mut rng, count)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Ticket> {
        (0..count).map(|_| self.sample_ticket(rng)).collect()
    }

    fn sample_ticket<R: Rng + ?Sized>(&self, rng: &mut R) -> Ticket {
        loop {
            // Five weighted draws with replacement; discard and redraw from
            // scratch unless all five are distinct.
            let mut drawn = HashSet::new();
            for _ in 0..5 {
                drawn.insert(self.primary_min + self.primary.sample(rng) as u8);
            }
            if drawn.len() < 5 {
                continue;
            }

            let secondary = self.secondary_min + self.secondary.sample(rng) as u8;

            let mut primary: Vec<u8> = drawn.into_iter().collect();
            primary.sort_unstable();

            // Validate through the ticket constructor; retry on failure.
            if let Ok(ticket) = Ticket::new(&mut primary[..], secondary) {
                return ticket;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Draw;
    use crate::freq::analyze;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    fn draw(primary: [u8; 5], secondary: u8) -> Draw {
        Draw {
            game: "Powerball".to_owned(),
            date: None,
            primary: primary.map(Some),
            secondary: Some(secondary),
            power_play: None,
        }
    }

    fn generator_from(draws: &[Draw]) -> WeightedGenerator {
        WeightedGenerator::from_frequencies(&analyze(draws)).expect("valid frequencies")
    }

    #[test]
    fn tickets_are_distinct_sorted_and_in_range() {
        let generator = generator_from(&[draw([3, 14, 27, 41, 58], 9)]);
        let mut rng = StdRng::seed_from_u64(7);

        for ticket in generator.generate_with_rng(&mut rng, 200) {
            assert!(ticket.primary.windows(2).all(|w| w[0] < w[1]), "sorted and distinct");
            assert!(
                ticket.primary.iter().all(|&n| (1..=69).contains(&n)),
                "primary in domain"
            );
            assert!((1..=26).contains(&ticket.secondary), "secondary in domain");
        }
    }

    #[test]
    fn generates_requested_count() {
        let generator = generator_from(&[draw([1, 2, 3, 4, 5], 1)]);
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(generator.generate_with_rng(&mut rng, 37).len(), 37);
        assert!(generator.generate_with_rng(&mut rng, 0).is_empty());
    }

    #[test]
    fn never_drawn_numbers_remain_selectable() {
        // Empty history: every weight is the floor of 1, sampling is uniform.
        let generator = generator_from(&[]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen_primary = HashSet::new();
        let mut seen_secondary = HashSet::new();
        for ticket in generator.generate_with_rng(&mut rng, 2000) {
            seen_primary.extend(ticket.primary);
            seen_secondary.insert(ticket.secondary);
        }

        // 10_000 primary draws over 69 values and 2_000 secondary draws over
        // 26 values cover the full domains with overwhelming probability.
        assert_eq!(seen_primary.len(), 69, "every primary number selectable");
        assert_eq!(seen_secondary.len(), 26, "every secondary number selectable");
    }

    #[test]
    fn heavier_numbers_are_drawn_more_often() {
        // Number 2 appears in every historical draw, number 1 in none.
        let history: Vec<Draw> = (0..50).map(|_| draw([2, 20, 30, 40, 50], 13)).collect();
        let generator = generator_from(&history);
        let mut rng = StdRng::seed_from_u64(99);

        let mut hits_of_two = 0usize;
        let mut hits_of_one = 0usize;
        for ticket in generator.generate_with_rng(&mut rng, 4000) {
            hits_of_two += usize::from(ticket.primary.contains(&2));
            hits_of_one += usize::from(ticket.primary.contains(&1));
        }

        assert!(
            hits_of_two > hits_of_one,
            "weighted number should dominate: {hits_of_two} vs {hits_of_one}"
        );
    }

    #[test]
    fn skewed_weights_still_terminate() {
        // One number holding almost all the weight maximizes collisions; the
        // +1 floor keeps 68 alternatives alive so the retry loop finishes.
        let history: Vec<Draw> = (0..500).map(|_| draw([7, 8, 9, 10, 11], 5)).collect();
        let generator = generator_from(&history);
        let mut rng = StdRng::seed_from_u64(123);

        let tickets = generator.generate_with_rng(&mut rng, 100);
        assert_eq!(tickets.len(), 100);
    }
}
