//! # LaserBox Joinery
//!
//! Synthesises the outlines of laser-cuttable box panels joined by finger
//! (tab-and-slot) joints.
//!
//! ## Pipeline
//!
//! - **Dimension Deriver**: nominal sizes, thickness and tooth counts become
//!   the inside/outside measurements and odd-corrected counts of one run
//! - **Indented Edge Generator**: one edge as alternating teeth and steps
//! - **Offset Balancer**: corner compensation so adjoining corner teeth sum to
//!   exactly one material thickness
//! - **Panel Path Assembler**: side walls, merged wall strips, top and bottom
//! - **Document Sink**: receives each finished panel in emission order

pub mod document;
pub mod error;
pub mod finger_box;
pub mod path;

pub use document::{Color, DocumentSink, Panel, PanelStyle, SvgDocument};
pub use error::{JoineryError, JoineryResult, ParameterError, SinkError};
pub use finger_box::{
    balance_offsets, derive_dimensions, generate_edge, BoxOptions, CardinalDirection,
    DerivedDimensions, DimensionWarning, Dimensions, Direction, EdgePath, EdgeSpec,
    FingerBoxMaker, OffsetBalance, TopAxis,
};
pub use path::{Bounds, PathCommand, PathData, PathPoint};
