//! Minimal DXF output: one layer for the outline, one for mounting holes.
//!
//! The document has a HEADER declaring millimeters, a LAYER table and an
//! ENTITIES section. Geometry is written as given; nothing is validated.

pub mod writer;

use crate::excellon::HoleRecord;
use crate::gerber::OutlineEntity;

pub use writer::DxfWriter;

/// `$INSUNITS` value for millimeters.
const INSUNITS_MILLIMETERS: i16 = 4;

/// A DXF layer name and ACI color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    /// Layer name.
    pub name: &'static str,
    /// AutoCAD color index.
    pub color: i16,
}

/// Layer holding outline lines and arcs (white).
pub const OUTLINE_LAYER: Layer = Layer {
    name: "OUTLINE",
    color: 7,
};

/// Layer holding mounting-hole circles (red).
pub const MOUNTING_HOLES_LAYER: Layer = Layer {
    name: "MOUNTING_HOLES",
    color: 1,
};

/// Serialize outline entities and holes into a DXF document.
///
/// Outline entities come first, in order, followed by one CIRCLE per hole
/// with radius `diameter / 2`. The output depends only on the inputs.
pub fn emit(outline: &[OutlineEntity], holes: &[HoleRecord]) -> String {
    let mut writer = DxfWriter::new();

    write_header(&mut writer);
    write_tables(&mut writer, &[OUTLINE_LAYER, MOUNTING_HOLES_LAYER]);

    writer.write_section_start("ENTITIES");
    for entity in outline {
        write_outline_entity(&mut writer, entity);
    }
    for hole in holes {
        write_hole(&mut writer, hole);
    }
    writer.write_section_end();

    writer.write_eof();
    writer.finish()
}

fn write_header(writer: &mut DxfWriter) {
    writer.write_section_start("HEADER");
    writer.write_string(9, "$INSUNITS");
    writer.write_i16(70, INSUNITS_MILLIMETERS);
    writer.write_section_end();
}

fn write_tables(writer: &mut DxfWriter, layers: &[Layer]) {
    writer.write_section_start("TABLES");
    writer.write_string(0, "TABLE");
    writer.write_string(2, "LAYER");
    writer.write_i16(70, i16::try_from(layers.len()).unwrap_or(i16::MAX));

    for layer in layers {
        writer.write_string(0, "LAYER");
        writer.write_string(2, layer.name);
        writer.write_i16(70, 0);
        writer.write_i16(62, layer.color);
        writer.write_string(6, "CONTINUOUS");
    }

    writer.write_string(0, "ENDTAB");
    writer.write_section_end();
}

fn write_outline_entity(writer: &mut DxfWriter, entity: &OutlineEntity) {
    match *entity {
        OutlineEntity::Line { x1, y1, x2, y2 } => {
            writer.write_string(0, "LINE");
            writer.write_string(8, OUTLINE_LAYER.name);
            writer.write_point2d(10, x1, y1);
            writer.write_point2d(11, x2, y2);
        }
        OutlineEntity::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        } => {
            writer.write_string(0, "ARC");
            writer.write_string(8, OUTLINE_LAYER.name);
            writer.write_point2d(10, cx, cy);
            writer.write_double(40, radius);
            writer.write_double(50, start_angle);
            writer.write_double(51, end_angle);
        }
    }
}

fn write_hole(writer: &mut DxfWriter, hole: &HoleRecord) {
    writer.write_string(0, "CIRCLE");
    writer.write_string(8, MOUNTING_HOLES_LAYER.name);
    writer.write_point2d(10, hole.x, hole.y);
    writer.write_double(40, hole.diameter / 2.0);
}
