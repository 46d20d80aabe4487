//! Derivation of inside/outside measurements and tooth counts

use super::types::{BoxOptions, DerivedDimensions, DimensionWarning, Dimensions, TopAxis};
use crate::error::ParameterError;
use laserbox_core::units::{from_drawing_units, to_drawing_units};
use tracing::{debug, warn};

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    // written so that NaN is rejected as well
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NonPositive { name, value })
    }
}

fn ensure_positive_count(name: &'static str, value: u32) -> Result<(), ParameterError> {
    ensure_positive(name, f64::from(value))
}

fn odd_indent_count(
    axis: TopAxis,
    requested: u32,
    warnings: &mut Vec<DimensionWarning>,
) -> u32 {
    if requested % 2 != 0 {
        return requested;
    }

    let used = requested + 1;
    let warning = DimensionWarning::EvenIndentCount {
        axis,
        requested,
        used,
    };
    warn!("{}", warning);
    warnings.push(warning);
    used
}

/// Turn user options into the measurements used by the panel assembler.
///
/// Walls are subtracted in the caller's unit before converting to drawing
/// units. Height loses one wall, or two when a lid is included; width and
/// depth always lose two. Even top/bottom tooth counts are bumped to the next
/// odd number and reported as warnings.
pub fn derive_dimensions(options: &BoxOptions) -> Result<DerivedDimensions, ParameterError> {
    ensure_positive("thickness", options.thickness)?;
    ensure_positive_count("side_indent_count", options.side_indent_count)?;
    ensure_positive_count("top_width_indent_count", options.top_width_indent_count)?;
    ensure_positive_count("top_depth_indent_count", options.top_depth_indent_count)?;

    let unit = options.unit;
    let height_walls = if options.include_lid { 2.0 } else { 1.0 };

    let inside = |axis: &'static str, nominal: f64, walls: f64| {
        let inside = if options.inside_specified {
            nominal
        } else {
            nominal - walls * options.thickness
        };
        if inside > 0.0 {
            Ok(to_drawing_units(inside, unit))
        } else {
            Err(ParameterError::InvalidDimensions {
                axis,
                inside,
                thickness: options.thickness,
            })
        }
    };

    let inside_height = inside("height", options.height, height_walls)?;
    let inside_width = inside("width", options.width, 2.0)?;
    let inside_depth = inside("depth", options.depth, 2.0)?;

    let thickness = to_drawing_units(options.thickness, unit);
    let line_width = to_drawing_units(options.line_width, unit);

    let outside_height = inside_height + height_walls * thickness;
    let outside_width = inside_width + 2.0 * thickness;
    let outside_depth = inside_depth + 2.0 * thickness;

    let mut warnings = Vec::new();
    let top_width_indent_count =
        odd_indent_count(TopAxis::Width, options.top_width_indent_count, &mut warnings);
    let top_depth_indent_count =
        odd_indent_count(TopAxis::Depth, options.top_depth_indent_count, &mut warnings);

    let dimensions = Dimensions {
        thickness,
        line_width,
        inside_width,
        inside_height,
        inside_depth,
        outside_width,
        outside_height,
        outside_depth,
        side_indent_count: options.side_indent_count,
        top_width_indent_count,
        top_depth_indent_count,
        side_indent_length: outside_height / f64::from(options.side_indent_count),
        top_width_indent_length: inside_width / f64::from(top_width_indent_count),
        top_depth_indent_length: inside_depth / f64::from(top_depth_indent_count),
    };

    debug!(
        unit = %unit,
        thickness = from_drawing_units(dimensions.thickness, unit),
        inside_width = from_drawing_units(dimensions.inside_width, unit),
        inside_height = from_drawing_units(dimensions.inside_height, unit),
        inside_depth = from_drawing_units(dimensions.inside_depth, unit),
        outside_width = from_drawing_units(dimensions.outside_width, unit),
        outside_height = from_drawing_units(dimensions.outside_height, unit),
        outside_depth = from_drawing_units(dimensions.outside_depth, unit),
        "Derived box dimensions"
    );

    Ok(DerivedDimensions {
        dimensions,
        warnings,
    })
}
