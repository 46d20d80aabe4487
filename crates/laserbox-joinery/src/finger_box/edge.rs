//! Finger-jointed edges and corner offset balancing

use super::types::{Direction, EdgeSpec, OffsetBalance};
use crate::path::PathCommand;
use tracing::debug;

/// Relative segments of one edge: teeth along the edge direction
/// interleaved with perpendicular steps of one material thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    direction: Direction,
    segments: Vec<(f64, f64)>,
}

impl EdgePath {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> &[(f64, f64)] {
        &self.segments
    }

    /// Signed tooth lengths along the edge direction
    pub fn teeth(&self) -> Vec<f64> {
        self.segments
            .iter()
            .step_by(2)
            .map(|&(dx, dy)| dx + dy)
            .collect()
    }

    /// Signed perpendicular steps between teeth
    pub fn steps(&self) -> Vec<f64> {
        self.segments
            .iter()
            .skip(1)
            .step_by(2)
            .map(|&(dx, dy)| dx + dy)
            .collect()
    }

    /// Net displacement of the whole edge
    pub fn displacement(&self) -> (f64, f64) {
        self.segments
            .iter()
            .fold((0.0, 0.0), |(x, y), &(dx, dy)| (x + dx, y + dy))
    }

    pub fn into_command(self) -> PathCommand {
        PathCommand::LineRel(self.segments)
    }
}

impl From<EdgePath> for PathCommand {
    fn from(edge: EdgePath) -> Self {
        edge.into_command()
    }
}

/// Build one edge as `indent_count` teeth separated by `indent_count - 1`
/// perpendicular steps.
///
/// The first step is `-thickness` when the edge starts indented and
/// `+thickness` otherwise; each following step flips sign. The initial offset
/// lengthens the first tooth, the last offset the last tooth, and both land on
/// the same tooth when there is only one. Inputs are not range checked.
pub fn generate_edge(spec: &EdgeSpec, thickness: f64) -> EdgePath {
    debug!(
        indent_count = spec.indent_count,
        indent_width = spec.indent_width,
        direction = ?spec.direction,
        start_indented = spec.start_indented,
        initial_offset = spec.initial_offset,
        last_offset = spec.last_offset,
        "Generating indented edge"
    );

    let count = spec.indent_count as usize;
    let mut segments = Vec::with_capacity((2 * count).saturating_sub(1));
    let mut current_indent = if spec.start_indented {
        -thickness
    } else {
        thickness
    };

    for i in 0..count {
        let mut tooth = spec.indent_width;
        if i == 0 {
            tooth += spec.initial_offset;
        }
        if i + 1 == count {
            tooth += spec.last_offset;
        }
        segments.push(spec.direction.along(tooth));

        if i + 1 < count {
            segments.push(spec.direction.across(current_indent));
            current_indent = -current_indent;
        }
    }

    EdgePath {
        direction: spec.direction,
        segments,
    }
}

/// Corner offsets for the edge drawn after a perpendicular edge.
///
/// The perpendicular edge ends indented when it started indented and had an
/// odd tooth count, or started flush and had an even one. If it ends indented
/// the next edge carries the thickness on its last tooth, otherwise on its
/// first, so `initial_offset + last_offset == thickness` always holds.
pub fn balance_offsets(
    perpendicular_started_indented: bool,
    perpendicular_indent_count: u32,
    thickness: f64,
) -> OffsetBalance {
    let is_even = perpendicular_indent_count % 2 == 0;
    let is_indented_at_end = perpendicular_started_indented != is_even;
    let initial_offset = if is_indented_at_end { 0.0 } else { thickness };

    OffsetBalance {
        is_indented_at_end,
        initial_offset,
        last_offset: thickness - initial_offset,
    }
}
