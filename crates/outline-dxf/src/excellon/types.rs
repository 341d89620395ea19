//! Excellon drill file types.

use serde::Serialize;

use crate::coord::MM_PER_INCH;
use crate::error::ConvertError;

/// Default smallest diameter treated as a mounting hole, in millimeters.
pub const DEFAULT_MIN_DIAMETER_MM: f64 = 3.0;

/// A drill hole that passed the diameter filter. All fields are millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleRecord {
    /// X coordinate of the hole center.
    pub x: f64,
    /// Y coordinate of the hole center.
    pub y: f64,
    /// Diameter of the drill hole.
    pub diameter: f64,
}

/// Excellon tool definition from the file header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Tool number (T1, T2, etc.).
    pub number: u32,
    /// Drill diameter in the units active when the tool was defined.
    pub diameter: f64,
}

/// Unit system for Excellon files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExcellonUnits {
    /// Metric (millimeters).
    Metric,
    /// Imperial (inches).
    Imperial,
}

impl ExcellonUnits {
    /// Factor that converts a value in these units to millimeters.
    pub const fn mm_factor(self) -> f64 {
        match self {
            Self::Metric => 1.0,
            Self::Imperial => MM_PER_INCH,
        }
    }
}

/// Inclusive diameter window, in millimeters, for holes worth keeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleFilter {
    /// Smallest accepted diameter.
    pub min_diameter_mm: f64,
    /// Largest accepted diameter, unbounded when `None`.
    pub max_diameter_mm: Option<f64>,
}

impl HoleFilter {
    /// Creates a filter. Bounds are not checked; see [`HoleFilter::validate`].
    pub const fn new(min_diameter_mm: f64, max_diameter_mm: Option<f64>) -> Self {
        Self {
            min_diameter_mm,
            max_diameter_mm,
        }
    }

    /// A filter that keeps every hole.
    pub const fn any() -> Self {
        Self::new(0.0, None)
    }

    /// Rejects negative bounds and a maximum below the minimum.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidFilter`] naming the offending bound.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.min_diameter_mm.is_nan() || self.min_diameter_mm < 0.0 {
            return Err(ConvertError::InvalidFilter(
                "minimum diameter must be >= 0".to_string(),
            ));
        }

        match self.max_diameter_mm {
            Some(max) if max.is_nan() || max < 0.0 => Err(ConvertError::InvalidFilter(
                "maximum diameter must be >= 0".to_string(),
            )),
            Some(max) if max < self.min_diameter_mm => Err(ConvertError::InvalidFilter(
                "maximum diameter must be >= minimum diameter".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// True if `diameter_mm` lies within the window, bounds included.
    pub fn accepts(&self, diameter_mm: f64) -> bool {
        diameter_mm >= self.min_diameter_mm
            && !matches!(self.max_diameter_mm, Some(max) if diameter_mm > max)
    }
}

impl Default for HoleFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DIAMETER_MM, None)
    }
}

/// Result of extracting one drill file.
#[derive(Debug, Clone, Serialize)]
pub struct DrillResult {
    /// Holes that passed the filter, in file order.
    pub holes: Vec<HoleRecord>,
    /// Tool definitions, sorted by tool number.
    pub tools: Vec<ToolDefinition>,
    /// Unit system in effect at the end of the file.
    pub units: ExcellonUnits,
    /// Holes that resolved but fell outside the filter.
    pub filtered_count: u32,
    /// Parser warnings encountered while processing the file.
    pub warnings: Vec<String>,
}
