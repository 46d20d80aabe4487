//! Structured SVG path data
//!
//! Outlines are assembled as a list of commands and only turned into the
//! `d` attribute text when handed to a document. Coordinates are printed as
//! fixed-point decimals with six places, independent of locale.

use std::fmt;

/// One path command. Everything but `MoveAbs` is relative to the pen.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// `M x,y`
    MoveAbs { x: f64, y: f64 },
    /// `m dx,dy`
    MoveRel { dx: f64, dy: f64 },
    /// `l dx1,dy1 dx2,dy2 ...`
    LineRel(Vec<(f64, f64)>),
    /// `a rx,ry xrot large-arc,sweep dx,dy`
    ArcRel {
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    },
    /// `z`
    Close,
}

/// Absolute pen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are within `tolerance` of `other`
    pub fn approx_eq(&self, other: &PathPoint, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Axis-aligned bounding box of traced pen positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

// -0.0 would otherwise print as "-0.000000"
fn fmt_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.6}", value)
}

fn fmt_pair(x: f64, y: f64) -> String {
    format!("{},{}", fmt_number(x), fmt_number(y))
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveAbs { x, y } => write!(f, "M {}", fmt_pair(*x, *y)),
            PathCommand::MoveRel { dx, dy } => write!(f, "m {}", fmt_pair(*dx, *dy)),
            PathCommand::LineRel(pairs) => {
                write!(f, "l")?;
                for (dx, dy) in pairs {
                    write!(f, " {}", fmt_pair(*dx, *dy))?;
                }
                Ok(())
            }
            PathCommand::ArcRel {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                dx,
                dy,
            } => write!(
                f,
                "a {} {} {},{} {}",
                fmt_pair(*rx, *ry),
                fmt_number(*x_rotation),
                u8::from(*large_arc),
                u8::from(*sweep),
                fmt_pair(*dx, *dy)
            ),
            PathCommand::Close => write!(f, "z"),
        }
    }
}

/// Ordered list of path commands making up one `<path>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: PathCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = PathCommand>) -> &mut Self {
        self.commands.extend(commands);
        self
    }

    pub fn move_abs(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(PathCommand::MoveAbs { x, y })
    }

    pub fn move_rel(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.push(PathCommand::MoveRel { dx, dy })
    }

    pub fn line_rel(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.push(PathCommand::LineRel(vec![(dx, dy)]))
    }

    pub fn line_rel_many(&mut self, pairs: Vec<(f64, f64)>) -> &mut Self {
        self.push(PathCommand::LineRel(pairs))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_rel(
        &mut self,
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    ) -> &mut Self {
        self.push(PathCommand::ArcRel {
            rx,
            ry,
            x_rotation,
            large_arc,
            sweep,
            dx,
            dy,
        })
    }

    /// Circular arc: equal radii, no rotation
    pub fn circ_rel(
        &mut self,
        radius: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    ) -> &mut Self {
        self.arc_rel(radius, radius, 0.0, large_arc, sweep, dx, dy)
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathCommand::Close)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Serialise to the SVG `d` attribute format
    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Absolute pen positions visited, in drawing order.
    ///
    /// Arcs contribute only their end point; `z` contributes the start of
    /// the current subpath.
    pub fn trace(&self) -> Vec<PathPoint> {
        let mut points = Vec::new();
        let mut pen = PathPoint::new(0.0, 0.0);
        let mut subpath_start = pen;

        for command in &self.commands {
            match command {
                PathCommand::MoveAbs { x, y } => {
                    pen = PathPoint::new(*x, *y);
                    subpath_start = pen;
                    points.push(pen);
                }
                PathCommand::MoveRel { dx, dy } => {
                    pen = PathPoint::new(pen.x + dx, pen.y + dy);
                    subpath_start = pen;
                    points.push(pen);
                }
                PathCommand::LineRel(pairs) => {
                    for (dx, dy) in pairs {
                        pen = PathPoint::new(pen.x + dx, pen.y + dy);
                        points.push(pen);
                    }
                }
                PathCommand::ArcRel { dx, dy, .. } => {
                    pen = PathPoint::new(pen.x + dx, pen.y + dy);
                    points.push(pen);
                }
                PathCommand::Close => {
                    pen = subpath_start;
                    points.push(pen);
                }
            }
        }

        points
    }

    /// Final pen position, `None` for an empty path
    pub fn end_point(&self) -> Option<PathPoint> {
        self.trace().last().copied()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let points = self.trace();
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl FromIterator<PathCommand> for PathData {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
