//! Domain logic for frequency-weighted Powerball number generation.
//!
//! Everything in this crate is pure computation over explicit values: draw
//! records in, frequency tables and tickets out. Fetching and file I/O live
//! in `luckyball-client`.

pub mod draw;
pub mod freq;
pub mod generator;
pub mod ticket;

pub use draw::Draw;
pub use freq::{Frequencies, FrequencyTable};
pub use generator::WeightedGenerator;
pub use ticket::{Ticket, TicketError};
