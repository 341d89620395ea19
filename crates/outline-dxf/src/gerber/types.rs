//! Gerber outline types: draw state, outline entities and the extraction result.

use serde::Serialize;

use crate::coord::{FormatSpec, MM_PER_INCH};

/// Unit mode declared by `%MOIN%` / `%MOMM%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Units {
    /// Inches.
    Inch,
    /// Millimeters.
    Millimeter,
}

impl Units {
    /// Factor that converts a value in these units to millimeters.
    pub const fn mm_factor(self) -> f64 {
        match self {
            Self::Inch => MM_PER_INCH,
            Self::Millimeter => 1.0,
        }
    }
}

/// Interpolation mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Linear interpolation (G01).
    Linear,
    /// Clockwise circular interpolation (G02).
    ClockwiseArc,
    /// Counter-clockwise circular interpolation (G03).
    CounterClockwiseArc,
}

impl InterpolationMode {
    /// Maps a G-code number to a mode. Codes other than 1, 2 and 3 are not
    /// interpolation modes.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Linear),
            2 => Some(Self::ClockwiseArc),
            3 => Some(Self::CounterClockwiseArc),
            _ => None,
        }
    }
}

/// D-code operation honored by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// D01: interpolate from the current point.
    Draw,
    /// D02: move without drawing.
    Move,
    /// D03: flash the aperture.
    Flash,
}

impl Operation {
    /// Maps a D-code number to an operation. Aperture selections (D10 and up)
    /// are not operations.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Draw),
            2 => Some(Self::Move),
            3 => Some(Self::Flash),
            _ => None,
        }
    }
}

/// Mutable state threaded through the Gerber line scan.
///
/// The current point is unknown until the first command carrying a
/// coordinate for that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Active interpolation mode.
    pub mode: InterpolationMode,
    /// Current X in file units.
    pub current_x: Option<f64>,
    /// Current Y in file units.
    pub current_y: Option<f64>,
    /// Last declared unit mode.
    pub units: Units,
    /// X axis coordinate format.
    pub x_format: FormatSpec,
    /// Y axis coordinate format.
    pub y_format: FormatSpec,
}

impl DrawState {
    /// The current point if both axes are known.
    pub const fn current_point(&self) -> Option<Point> {
        match (self.current_x, self.current_y) {
            (Some(x), Some(y)) => Some(Point { x, y }),
            _ => None,
        }
    }
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            mode: InterpolationMode::Linear,
            current_x: None,
            current_y: None,
            units: Units::Millimeter,
            x_format: FormatSpec::default(),
            y_format: FormatSpec::default(),
        }
    }
}

/// 2D point in board coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy).sqrt()
    }
}

/// One primitive of the board outline.
///
/// Lengths are millimeters once they leave the extractor. Arc angles are
/// degrees in `[0, 360)`, counter-clockwise from +X, and the arc always runs
/// counter-clockwise from `start_angle` to `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineEntity {
    /// Straight segment.
    Line {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
    },
    /// Circular arc.
    Arc {
        /// Center X.
        cx: f64,
        /// Center Y.
        cy: f64,
        /// Radius.
        radius: f64,
        /// Start angle in degrees.
        start_angle: f64,
        /// End angle in degrees.
        end_angle: f64,
    },
}

impl OutlineEntity {
    /// Multiplies every linear measurement by `factor`. Angles are unchanged.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Line { x1, y1, x2, y2 } => Self::Line {
                x1: x1 * factor,
                y1: y1 * factor,
                x2: x2 * factor,
                y2: y2 * factor,
            },
            Self::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
            } => Self::Arc {
                cx: cx * factor,
                cy: cy * factor,
                radius: radius * factor,
                start_angle,
                end_angle,
            },
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an empty bounding box that will expand with the first `update` call.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expands the bounding box to include the given point.
    pub fn update(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Expands the box to cover an outline entity. Arcs contribute their
    /// full circle, which over-approximates partial arcs.
    pub fn include(&mut self, entity: &OutlineEntity) {
        match *entity {
            OutlineEntity::Line { x1, y1, x2, y2 } => {
                self.update(x1, y1);
                self.update(x2, y2);
            }
            OutlineEntity::Arc { cx, cy, radius, .. } => {
                self.update(cx - radius, cy - radius);
                self.update(cx + radius, cy + radius);
            }
        }
    }

    /// True until the first point is added.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting one outline Gerber file.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineResult {
    /// Outline primitives in millimeters, in file order.
    pub entities: Vec<OutlineEntity>,
    /// Unit mode in effect at the end of the file.
    pub units: Units,
    /// Bounds of all entities in millimeters.
    pub bounds: BoundingBox,
    /// Number of command lines scanned.
    pub command_count: u32,
    /// Constructs that were skipped while scanning.
    pub warnings: Vec<String>,
}
