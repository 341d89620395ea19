//! Console summary of a finished conversion.

use std::path::Path;

use outline_dxf::{Conversion, HoleFilter};

/// Summary lines printed after the DXF is written.
pub fn summary(output: &Path, conversion: &Conversion, filter: HoleFilter) -> String {
    let name = output
        .file_name()
        .map_or_else(|| output.display().to_string(), |n| n.to_string_lossy().into_owned());

    let range = match filter.max_diameter_mm {
        Some(max) => format!("{:.4} to {max:.4} mm", filter.min_diameter_mm),
        None => format!(">= {:.4} mm", filter.min_diameter_mm),
    };

    let diameters = conversion.distinct_diameters();
    let diameter_text = if diameters.is_empty() {
        "none".to_string()
    } else {
        diameters
            .iter()
            .map(|d| format!("{d:.4}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Output file: {name}\n\
         Outline entities: {}\n\
         Hole count ({range}): {}\n\
         Diameters used (mm): {diameter_text}\n",
        conversion.outline.entities.len(),
        conversion.holes.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_dxf::convert;

    const OUTLINE: &str = "X0Y0D02*\nX10000000Y0D01*\nX10000000Y5000000D01*\n";
    const DRILL: &str = "METRIC\nT1C3.0\nT2C3.2\nT1\nX1Y1\nX2Y2\nT2\nX3Y3\n";

    #[test]
    fn summary_without_maximum() {
        let filter = HoleFilter::default();
        let conversion = convert(OUTLINE, &[DRILL], filter).unwrap();
        let text = summary(Path::new("/out/board-outline-mounting-holes.dxf"), &conversion, filter);
        assert_eq!(
            text,
            "Output file: board-outline-mounting-holes.dxf\n\
             Outline entities: 2\n\
             Hole count (>= 3.0000 mm): 3\n\
             Diameters used (mm): 3.0000, 3.2000\n"
        );
    }

    #[test]
    fn summary_with_maximum_and_no_holes() {
        let filter = HoleFilter::new(1.0, Some(2.0));
        let conversion = convert(OUTLINE, &[DRILL], filter).unwrap();
        let text = summary(Path::new("x.dxf"), &conversion, filter);
        assert!(text.contains("Hole count (1.0000 to 2.0000 mm): 0\n"));
        assert!(text.ends_with("Diameters used (mm): none\n"));
    }
}
