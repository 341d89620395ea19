//! Outline + drills to DXF in one call.

use tracing::{debug, warn};

use crate::dxf;
use crate::error::ConvertError;
use crate::excellon::{self, DrillResult, HoleFilter, HoleRecord};
use crate::gerber::{self, OutlineResult};

/// Everything produced by one conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Outline extraction result.
    pub outline: OutlineResult,
    /// One result per drill text, in input order.
    pub drills: Vec<DrillResult>,
    /// Holes from every drill text, concatenated in input order.
    pub holes: Vec<HoleRecord>,
    /// The DXF document.
    pub document: String,
}

impl Conversion {
    /// Distinct hole diameters in millimeters, rounded to six decimals and
    /// sorted ascending.
    pub fn distinct_diameters(&self) -> Vec<f64> {
        let mut diameters: Vec<f64> = self
            .holes
            .iter()
            .map(|hole| (hole.diameter * 1e6).round() / 1e6)
            .collect();
        diameters.sort_by(f64::total_cmp);
        diameters.dedup();
        diameters
    }

    /// All warnings, outline first, each prefixed with its source.
    pub fn warnings(&self) -> Vec<String> {
        let outline = self
            .outline
            .warnings
            .iter()
            .map(|w| format!("outline: {w}"));
        let drills = self.drills.iter().enumerate().flat_map(|(idx, drill)| {
            drill
                .warnings
                .iter()
                .map(move |w| format!("drill #{}: {w}", idx + 1))
        });
        outline.chain(drills).collect()
    }
}

/// Extract the outline and the holes of every drill text and emit a DXF.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidFilter`] if `filter` fails validation.
/// Malformed or empty content never errors; it only yields fewer entities,
/// and an outline without entities is recorded as a warning.
pub fn convert(
    outline_text: &str,
    drill_texts: &[&str],
    filter: HoleFilter,
) -> Result<Conversion, ConvertError> {
    filter.validate()?;

    let mut outline = gerber::extract(outline_text);
    if outline.entities.is_empty() {
        warn!("no outline entities");
        outline.warnings.push("no outline entities".to_string());
    }
    let drills: Vec<DrillResult> = drill_texts
        .iter()
        .map(|text| excellon::extract(text, filter))
        .collect();
    let holes: Vec<HoleRecord> = drills
        .iter()
        .flat_map(|drill| drill.holes.iter().copied())
        .collect();

    let document = dxf::emit(&outline.entities, &holes);
    debug!(
        entities = outline.entities.len(),
        holes = holes.len(),
        bytes = document.len(),
        "dxf document emitted"
    );

    Ok(Conversion {
        outline,
        drills,
        holes,
        document,
    })
}
