use console::style;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One generated play: five distinct main numbers in ascending order plus
/// the Powerball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub primary: [u8; 5],
    pub secondary: u8,
}

impl Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            style(format!(
                "{} {} {} {} {}",
                self.primary[0], self.primary[1], self.primary[2], self.primary[3], self.primary[4]
            ))
            .bold(),
            style(self.secondary).red().bold()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    InvalidPrimaryCount(usize),
    PrimaryOutOfRange(u8),
    PrimaryDuplicate,
    InvalidSecondary(u8),
}

impl Display for TicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrimaryCount(count) => {
                write!(f, "Invalid number of main numbers: expected 5, got {count}")
            }
            Self::PrimaryOutOfRange(number) => {
                write!(f, "Main number {number} is out of range (1-69)")
            }
            Self::PrimaryDuplicate => write!(f, "Duplicate main numbers found"),
            Self::InvalidSecondary(number) => {
                write!(f, "Powerball {number} is out of range (1-26)")
            }
        }
    }
}

impl std::error::Error for TicketError {}

impl Ticket {
    /// Validate and build a ticket; the primary numbers are sorted in place.
    pub fn new(primary: impl AsMut<[u8]>, secondary: u8) -> Result<Self, TicketError> {
        Self::check(primary, secondary)
    }

    fn check(mut primary: impl AsMut<[u8]>, secondary: u8) -> Result<Self, TicketError> {
        let primary = primary.as_mut();
        if primary.len() != 5 {
            return Err(TicketError::InvalidPrimaryCount(primary.len()));
        }

        for number in primary.iter() {
            if !(crate::freq::PRIMARY_MIN..=crate::freq::PRIMARY_MAX).contains(number) {
                return Err(TicketError::PrimaryOutOfRange(*number));
            }
        }

        if !(crate::freq::SECONDARY_MIN..=crate::freq::SECONDARY_MAX).contains(&secondary) {
            return Err(TicketError::InvalidSecondary(secondary));
        }

        primary.sort_unstable();
        if primary.windows(2).any(|w| w[0] == w[1]) {
            return Err(TicketError::PrimaryDuplicate);
        }
        let len = primary.len();
        let primary: [u8; 5] = primary
            .try_into()
            .map_err(|_e| TicketError::InvalidPrimaryCount(len))?;

        Ok(Self { primary, secondary })
    }
}
