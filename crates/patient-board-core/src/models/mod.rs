//! Domain models for the patient board.

mod field;
mod record;

pub use field::*;
pub use record::*;
