//! Unit conversion utilities
//!
//! Converts user-facing measurements into SVG user units (px at 96 dpi),
//! which is the coordinate system every generated outline is written in.
//! Supports decimal and fractional inch parsing and formatting.

use crate::error::{UnitError, UnitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SVG user units per inch
pub const PX_PER_INCH: f64 = 96.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement unit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Meters
    M,
    /// Inches
    In,
    /// Points (1/72 inch)
    Pt,
    /// Picas (12 points)
    Pc,
    /// SVG user units
    Px,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Mm
    }
}

impl Unit {
    /// Drawing units per one of this unit
    pub fn px_per_unit(self) -> f64 {
        match self {
            Self::Mm => PX_PER_INCH / MM_PER_INCH,
            Self::Cm => 10.0 * PX_PER_INCH / MM_PER_INCH,
            Self::M => 1000.0 * PX_PER_INCH / MM_PER_INCH,
            Self::In => PX_PER_INCH,
            Self::Pt => PX_PER_INCH / 72.0,
            Self::Pc => PX_PER_INCH / 6.0,
            Self::Px => 1.0,
        }
    }

    /// Canonical label ("mm", "in", ...)
    pub fn label(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::M => "m",
            Self::In => "in",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Px => "px",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Mm),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Cm),
            "m" | "meter" | "meters" => Ok(Self::M),
            "in" | "inch" | "inches" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            "pc" => Ok(Self::Pc),
            "px" | "uu" => Ok(Self::Px),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a value given in `unit` to drawing units
pub fn to_drawing_units(value: f64, unit: Unit) -> f64 {
    value * unit.px_per_unit()
}

/// Convert a value in drawing units back to `unit`
pub fn from_drawing_units(value: f64, unit: Unit) -> f64 {
    value / unit.px_per_unit()
}

/// Format length value for display
///
/// * `value` - Value already expressed in `unit`
/// * `unit` - Unit label appended to the number
pub fn format_length(value: f64, unit: Unit) -> String {
    format!("{:.3}{}", value, unit)
}

fn parse_number(part: &str) -> UnitResult<f64> {
    part.parse::<f64>().map_err(|e| UnitError::InvalidNumber {
        input: part.to_string(),
        reason: e.to_string(),
    })
}

/// Parse length string into a value in `unit`
///
/// Inches additionally accept whole-plus-fraction forms such as `1 1/2`.
pub fn parse_length(input: &str, unit: Unit) -> UnitResult<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    if unit != Unit::In || !input.contains('/') {
        return parse_number(input);
    }

    let mut total = 0.0;
    for part in input.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err(UnitError::InvalidFraction(part.to_string()));
            }
            let num = parse_number(frac_parts[0])?;
            let den = parse_number(frac_parts[1])?;
            if den == 0.0 {
                return Err(UnitError::DivisionByZero(part.to_string()));
            }
            total += num / den;
        } else {
            total += parse_number(part)?;
        }
    }
    Ok(total)
}
