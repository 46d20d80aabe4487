//! # LaserBox Core
//!
//! Unit errors and the unit conversion helpers used to turn
//! user-facing measurements into SVG drawing units.

pub mod error;
pub mod units;

pub use error::{UnitError, UnitResult};
pub use units::{format_length, from_drawing_units, parse_length, to_drawing_units, Unit};
