//! Live input helpers: sentence casing and field auto-sizing.
//!
//! Both are view-side transforms. The store keeps whatever text it is given.

mod casing;
mod sizing;

pub use casing::*;
pub use sizing::*;
