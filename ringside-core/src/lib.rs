//! # ringside-core
//!
//! This crate contains the pure matchmaking rules used to place fighter
//! registrations into tournament divisions. It is free of any I/O; the
//! server crate feeds it data and persists the results.
//!
//! Important items:
//! - [`AgeClass`]: The fixed age bands a fighter competes in.
//! - [`DivisionKey`]: The tuple a division is matched on.
//! - [`Division`]: A trait implemented by bracket-like types that can
//! accept fighters.
//! - [`find_target`]: Selects the fullest open division matching a key.
//! - [`next_seed`] / [`next_bracket_number`]: Deterministic numbering
//! rules.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to the key types.

pub mod division;
pub mod matching;

pub use division::{bracket_criteria, division_title, sport_label, AgeClass, DivisionKey};
pub use matching::{find_target, next_bracket_number, next_seed, seeds_contiguous, Division};

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The division roster already holds `max_competitors` fighters.
    #[error("division is at capacity")]
    CapacityExceeded,
}
