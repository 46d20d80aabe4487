//! Type definitions for the finger-jointed box generator

use crate::document::Color;
use laserbox_core::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis a segment is drawn along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Axis plus travel sign. `sign` is -1 when the pen runs back towards the
/// panel origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub axis: Axis,
    pub sign: f64,
}

impl Direction {
    /// Displacement of a segment of `length` along this direction
    pub fn along(self, length: f64) -> (f64, f64) {
        match self.axis {
            Axis::Horizontal => (self.sign * length, 0.0),
            Axis::Vertical => (0.0, self.sign * length),
        }
    }

    /// Displacement of a perpendicular step. The step sign is absolute and is
    /// not flipped by the direction of travel.
    pub fn across(self, step: f64) -> (f64, f64) {
        match self.axis {
            Axis::Horizontal => (0.0, step),
            Axis::Vertical => (step, 0.0),
        }
    }
}

/// The four named directions an edge can be drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

const DIRECTIONS: [Direction; 4] = [
    Direction {
        axis: Axis::Vertical,
        sign: -1.0,
    },
    Direction {
        axis: Axis::Horizontal,
        sign: 1.0,
    },
    Direction {
        axis: Axis::Vertical,
        sign: 1.0,
    },
    Direction {
        axis: Axis::Horizontal,
        sign: -1.0,
    },
];

impl CardinalDirection {
    pub fn direction(self) -> Direction {
        DIRECTIONS[self as usize]
    }
}

impl From<CardinalDirection> for Direction {
    fn from(value: CardinalDirection) -> Self {
        value.direction()
    }
}

/// One finger-jointed edge, before it is turned into line segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpec {
    pub indent_count: u32,
    pub indent_width: f64,
    pub direction: Direction,
    pub start_indented: bool,
    /// Added to the first tooth
    pub initial_offset: f64,
    /// Added to the last tooth
    pub last_offset: f64,
}

impl EdgeSpec {
    pub fn new(
        indent_count: u32,
        indent_width: f64,
        direction: impl Into<Direction>,
        start_indented: bool,
    ) -> Self {
        Self {
            indent_count,
            indent_width,
            direction: direction.into(),
            start_indented,
            initial_offset: 0.0,
            last_offset: 0.0,
        }
    }

    pub fn with_offsets(mut self, initial_offset: f64, last_offset: f64) -> Self {
        self.initial_offset = initial_offset;
        self.last_offset = last_offset;
        self
    }
}

/// End state of an edge and the corner offsets for the edge that follows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetBalance {
    pub is_indented_at_end: bool,
    pub initial_offset: f64,
    pub last_offset: f64,
}

impl OffsetBalance {
    /// Offsets for an edge drawn in the opposite direction
    pub fn swapped(&self) -> (f64, f64) {
        (self.last_offset, self.initial_offset)
    }
}

/// Which top/bottom edge a count or warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopAxis {
    Width,
    Depth,
}

impl fmt::Display for TopAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "top width"),
            Self::Depth => write!(f, "top depth"),
        }
    }
}

/// User-facing box parameters, lengths in `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    pub thickness: f64,
    pub line_width: f64,
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub unit: Unit,
    pub side_indent_count: u32,
    pub top_width_indent_count: u32,
    pub top_depth_indent_count: u32,
    pub include_lid: bool,
    /// Draw all four walls as one unrolled strip
    pub merge_sides: bool,
    /// Height/width/depth are inside measurements
    pub inside_specified: bool,
    /// Outline colour of panels and seam lines
    pub stroke_color: Color,
    /// Panel fill colour
    pub fill_color: Color,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            line_width: 0.1,
            height: 50.0,
            width: 100.0,
            depth: 60.0,
            unit: Unit::Mm,
            side_indent_count: 5,
            top_width_indent_count: 7,
            top_depth_indent_count: 5,
            include_lid: true,
            merge_sides: false,
            inside_specified: false,
            stroke_color: Color::BLACK,
            fill_color: Color::GREY,
        }
    }
}

/// Measurements of one generation run, all in drawing units.
///
/// `top_width_indent_count` and `top_depth_indent_count` are always odd.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    pub thickness: f64,
    pub line_width: f64,
    pub inside_width: f64,
    pub inside_height: f64,
    pub inside_depth: f64,
    pub outside_width: f64,
    pub outside_height: f64,
    pub outside_depth: f64,
    pub side_indent_count: u32,
    pub top_width_indent_count: u32,
    pub top_depth_indent_count: u32,
    pub side_indent_length: f64,
    pub top_width_indent_length: f64,
    pub top_depth_indent_length: f64,
}

impl Dimensions {
    /// Tooth count and tooth length along a top/bottom edge
    pub fn top_indents(&self, axis: TopAxis) -> (u32, f64) {
        match axis {
            TopAxis::Width => (self.top_width_indent_count, self.top_width_indent_length),
            TopAxis::Depth => (self.top_depth_indent_count, self.top_depth_indent_length),
        }
    }
}

/// Non-fatal correction applied while deriving dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionWarning {
    EvenIndentCount {
        axis: TopAxis,
        requested: u32,
        used: u32,
    },
}

impl fmt::Display for DimensionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenIndentCount {
                axis,
                requested,
                used,
            } => write!(
                f,
                "{} indent count must be odd: got {}, using {}",
                axis, requested, used
            ),
        }
    }
}

/// Dimensions plus the warnings raised while deriving them
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDimensions {
    pub dimensions: Dimensions,
    pub warnings: Vec<DimensionWarning>,
}
