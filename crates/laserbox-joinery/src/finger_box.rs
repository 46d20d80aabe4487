//! Finger-Jointed Box Maker
//!
//! Assembles closed panel outlines from finger-jointed edges. Every panel
//! starts at its upper-left corner and is drawn South, East, North, then West,
//! with the corner offsets balanced so that the two teeth meeting at a corner
//! add up to exactly one material thickness.

mod dimensions;
mod edge;
mod types;

pub use dimensions::derive_dimensions;
pub use edge::{balance_offsets, generate_edge, EdgePath};
pub use types::{
    Axis, BoxOptions, CardinalDirection, DerivedDimensions, DimensionWarning, Dimensions,
    Direction, EdgeSpec, OffsetBalance, TopAxis,
};

use self::types::CardinalDirection::{East, North, South, West};
use crate::document::{DocumentSink, Panel, PanelStyle};
use crate::error::JoineryResult;
use crate::path::{PathCommand, PathData};
use tracing::info;

fn edge(spec: EdgeSpec, dims: &Dimensions) -> PathCommand {
    generate_edge(&spec, dims.thickness).into_command()
}

/// A side-height edge drawn southwards from `(x, y)`, plus the offsets the
/// following horizontal edge needs.
fn indented_vertical_line(
    dims: &Dimensions,
    x: f64,
    y: f64,
    start_indented: bool,
) -> (PathData, OffsetBalance) {
    let mut path = PathData::new();
    path.move_abs(x, y);
    path.push(edge(
        EdgeSpec::new(
            dims.side_indent_count,
            dims.side_indent_length,
            South,
            start_indented,
        ),
        dims,
    ));
    let balance = balance_offsets(start_indented, dims.side_indent_count, dims.thickness);
    (path, balance)
}

/// Outline of one box wall. Without a lid the top edge is left plain and
/// closed by `z`.
pub fn side_panel_path(
    dims: &Dimensions,
    x: f64,
    y: f64,
    axis: TopAxis,
    include_lid: bool,
) -> PathData {
    let (count, length) = dims.top_indents(axis);
    let left_start_indented = false;

    let (mut path, south) = indented_vertical_line(dims, x, y, left_start_indented);
    path.push(edge(
        EdgeSpec::new(count, length, East, true)
            .with_offsets(south.initial_offset, south.last_offset),
        dims,
    ));
    path.push(edge(
        EdgeSpec::new(
            dims.side_indent_count,
            dims.side_indent_length,
            North,
            south.is_indented_at_end,
        ),
        dims,
    ));

    let north = balance_offsets(
        south.is_indented_at_end,
        dims.side_indent_count,
        dims.thickness,
    );
    if include_lid {
        let (initial, last) = north.swapped();
        path.push(edge(
            EdgeSpec::new(count, length, West, false).with_offsets(initial, last),
            dims,
        ));
    }
    path.close();
    path
}

/// All four walls unrolled into one strip: width, width, depth, depth.
pub fn merged_side_panel_path(dims: &Dimensions, x: f64, y: f64, include_lid: bool) -> PathData {
    let left_start_indented = false;
    let (mut path, south) = indented_vertical_line(dims, x, y, left_start_indented);

    for axis in [TopAxis::Width, TopAxis::Width, TopAxis::Depth, TopAxis::Depth] {
        let (count, length) = dims.top_indents(axis);
        path.push(edge(
            EdgeSpec::new(count, length, East, true)
                .with_offsets(south.initial_offset, south.last_offset),
            dims,
        ));
    }

    path.push(edge(
        EdgeSpec::new(
            dims.side_indent_count,
            dims.side_indent_length,
            North,
            south.is_indented_at_end,
        ),
        dims,
    ));

    let north = balance_offsets(
        south.is_indented_at_end,
        dims.side_indent_count,
        dims.thickness,
    );
    if include_lid {
        let (initial, last) = north.swapped();
        for axis in [TopAxis::Depth, TopAxis::Depth, TopAxis::Width, TopAxis::Width] {
            let (count, length) = dims.top_indents(axis);
            path.push(edge(
                EdgeSpec::new(count, length, West, false).with_offsets(initial, last),
                dims,
            ));
        }
    }
    path.close();
    path
}

/// X offsets (relative to the strip origin) of the three fold seams
pub fn seam_offsets(dims: &Dimensions) -> [f64; 3] {
    let width_run = dims.inside_width + dims.thickness;
    let depth_run = dims.inside_depth + dims.thickness;
    [width_run, 2.0 * width_run, 2.0 * width_run + depth_run]
}

/// Open indented lines marking where the merged strip is cut between walls
pub fn seam_cut_paths(dims: &Dimensions, x: f64, y: f64) -> [PathData; 3] {
    seam_offsets(dims).map(|offset| indented_vertical_line(dims, x + offset, y, false).0)
}

/// Top or bottom panel. All four edges share one corner convention so no
/// balancing is needed.
pub fn top_panel_path(dims: &Dimensions, x: f64, y: f64) -> PathData {
    let (width_count, width_length) = dims.top_indents(TopAxis::Width);
    let (depth_count, depth_length) = dims.top_indents(TopAxis::Depth);

    let mut path = PathData::new();
    path.move_abs(x, y);
    path.push(edge(EdgeSpec::new(depth_count, depth_length, South, true), dims));
    path.push(edge(EdgeSpec::new(width_count, width_length, East, false), dims));
    path.push(edge(EdgeSpec::new(depth_count, depth_length, North, false), dims));
    path.push(edge(EdgeSpec::new(width_count, width_length, West, true), dims));
    path.close();
    path
}

/// Panels are packed edge to edge, left to right, one row at a time
#[derive(Clone, Copy, Debug, Default)]
struct LayoutCursor {
    x: f64,
    y: f64,
}

impl LayoutCursor {
    fn place(&mut self, width: f64) -> (f64, f64) {
        let position = (self.x, self.y);
        self.x += width;
        position
    }

    fn next_row(&mut self, height: f64, indent: f64) {
        self.y += height;
        self.x = indent;
    }
}

/// Generates every panel of one box and hands them to a document sink
#[derive(Debug, Clone)]
pub struct FingerBoxMaker {
    options: BoxOptions,
    dims: Dimensions,
    warnings: Vec<DimensionWarning>,
}

impl FingerBoxMaker {
    pub fn new(options: BoxOptions) -> JoineryResult<Self> {
        let DerivedDimensions {
            dimensions,
            warnings,
        } = derive_dimensions(&options)?;

        Ok(Self {
            options,
            dims: dimensions,
            warnings,
        })
    }

    pub fn options(&self) -> &BoxOptions {
        &self.options
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// Corrections applied while deriving dimensions
    pub fn warnings(&self) -> &[DimensionWarning] {
        &self.warnings
    }

    /// Emit sides (or the merged strip and its seams), then bottom, then top.
    ///
    /// The first sink error stops generation and is returned unchanged.
    pub fn generate<S: DocumentSink + ?Sized>(&self, sink: &mut S) -> JoineryResult<()> {
        let dims = &self.dims;
        let include_lid = self.options.include_lid;
        let options = &self.options;
        let style = PanelStyle::filled(dims.line_width)
            .with_colors(options.stroke_color, options.fill_color);
        let mut layout = LayoutCursor::default();

        let mut emit = |panel: Panel| -> JoineryResult<()> {
            info!(label = panel.label(), "Emitting panel");
            sink.insert(panel)?;
            Ok(())
        };

        if self.options.merge_sides {
            let strip_width = seam_offsets(dims)[2] + dims.inside_depth + 2.0 * dims.thickness;
            let (x, y) = layout.place(strip_width);
            emit(Panel::new(
                style,
                merged_side_panel_path(dims, x, y, include_lid),
                "sides",
            ))?;

            let seam_style =
                PanelStyle::stroke_only(dims.line_width).with_colors(options.stroke_color, None);
            for (i, seam) in seam_cut_paths(dims, x, y).into_iter().enumerate() {
                emit(Panel::new(seam_style, seam, format!("cut{}", i)))?;
            }
        } else {
            for (label, axis) in [
                ("front", TopAxis::Width),
                ("back", TopAxis::Width),
                ("right", TopAxis::Depth),
                ("left", TopAxis::Depth),
            ] {
                let panel_width = match axis {
                    TopAxis::Width => dims.outside_width,
                    TopAxis::Depth => dims.outside_depth,
                };
                let (x, y) = layout.place(panel_width);
                emit(Panel::new(
                    style,
                    side_panel_path(dims, x, y, axis, include_lid),
                    label,
                ))?;
            }
        }

        layout.next_row(dims.outside_height + dims.thickness, dims.thickness);
        let (x, y) = layout.place(dims.outside_width);
        emit(Panel::new(style, top_panel_path(dims, x, y), "bottom"))?;

        if include_lid {
            let (x, y) = layout.place(dims.outside_width);
            emit(Panel::new(style, top_panel_path(dims, x, y), "top"))?;
        }

        Ok(())
    }

    /// Convenience wrapper collecting the emitted panels
    pub fn panels(&self) -> JoineryResult<Vec<Panel>> {
        let mut panels = Vec::new();
        self.generate(&mut panels)?;
        Ok(panels)
    }
}
