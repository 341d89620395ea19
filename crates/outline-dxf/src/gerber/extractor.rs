//! Line-oriented Gerber scanner that keeps only path geometry.
//!
//! Apertures, regions and polarity are ignored. Every D01 becomes a line or
//! an arc once both of its endpoints are known; D02, D03 and coordinate-only
//! lines just move the current point.

use tracing::{debug, warn};

use crate::coord::{decode, find_field, FormatSpec, ZeroSuppression};

use super::types::{
    BoundingBox, DrawState, InterpolationMode, Operation, OutlineEntity, OutlineResult, Point,
    Units,
};

const COMMENT_PREFIX: &str = "G04";
const MIN_ARC_RADIUS: f64 = 1e-12;

#[derive(Debug, Default)]
struct ScanState {
    draw: DrawState,
    entities: Vec<OutlineEntity>,
    warnings: Vec<String>,
    command_count: u32,
    open_block: Option<String>,
}

impl ScanState {
    fn warn(&mut self, msg: String) {
        warn!("{msg}");
        self.warnings.push(msg);
    }
}

/// Extract outline lines and arcs from Gerber text.
///
/// Never fails. Coordinates are decoded with the active `%FS%` layout and
/// everything is converted to millimeters at the end using the last unit
/// directive seen in the file.
pub fn extract(text: &str) -> OutlineResult {
    let mut state = ScanState::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(mut block) = state.open_block.take() {
            if is_command_line(line) {
                state.warn(format!(
                    "line {}: unterminated parameter block dropped",
                    index + 1
                ));
            } else {
                block.push_str(line);
                if line.ends_with('%') {
                    apply_parameter_block(&block, &mut state.draw);
                } else {
                    state.open_block = Some(block);
                }
                continue;
            }
        }

        if is_comment(line) {
            continue;
        }

        if line == "%" {
            continue;
        }

        if line.starts_with('%') {
            if line.ends_with('%') {
                apply_parameter_block(line, &mut state.draw);
            } else {
                state.open_block = Some(line.to_string());
            }
            continue;
        }

        let command = line.strip_suffix('*').unwrap_or(line);
        apply_command(command, index + 1, &mut state);
    }

    if state.open_block.take().is_some() {
        state.warn("unterminated parameter block at end of file".to_string());
    }

    finish(state)
}

/// True for lines that can only be commands, never parameter block content:
/// a D01/D02/D03 operation, or a `*`-terminated G, X or Y word.
fn is_command_line(line: &str) -> bool {
    let upper = line.to_ascii_uppercase();
    if codes(&upper, 'D').any(|code| Operation::from_code(code).is_some()) {
        return true;
    }
    upper.ends_with('*') && upper.starts_with(['G', 'X', 'Y'])
}

fn is_comment(line: &str) -> bool {
    line.get(..COMMENT_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(COMMENT_PREFIX))
}

fn apply_parameter_block(block: &str, draw: &mut DrawState) {
    let body = block.trim_matches('%');
    for word in body.split('*').map(str::trim).filter(|w| !w.is_empty()) {
        let word = word.to_ascii_uppercase();

        if let Some((x_format, y_format)) = parse_format_spec(&word) {
            debug!(?x_format, ?y_format, "format spec directive");
            draw.x_format = x_format;
            draw.y_format = y_format;
        } else if word == "MOIN" {
            debug!("units set to inch");
            draw.units = Units::Inch;
        } else if word == "MOMM" {
            debug!("units set to millimeter");
            draw.units = Units::Millimeter;
        }
    }
}

/// Parses `FS<L|T|D>[A]X<i><d>Y<i><d>` into per-axis formats.
fn parse_format_spec(word: &str) -> Option<(FormatSpec, FormatSpec)> {
    let rest = word.strip_prefix("FS")?;

    let mut chars = rest.chars();
    let suppression = match chars.next()? {
        'L' => ZeroSuppression::Leading,
        'T' => ZeroSuppression::Trailing,
        'D' => ZeroSuppression::None,
        _ => return None,
    };

    let rest = chars.as_str();
    let rest = rest.strip_prefix('A').unwrap_or(rest);
    let ((x_int, x_dec), rest) = digit_pair(rest.strip_prefix('X')?)?;
    let ((y_int, y_dec), rest) = digit_pair(rest.strip_prefix('Y')?)?;
    if !rest.is_empty() {
        return None;
    }

    Some((
        FormatSpec::new(x_int, x_dec, suppression),
        FormatSpec::new(y_int, y_dec, suppression),
    ))
}

fn digit_pair(text: &str) -> Option<((u8, u8), &str)> {
    let mut chars = text.chars();
    let integer = u8::try_from(chars.next()?.to_digit(10)?).ok()?;
    let decimal = u8::try_from(chars.next()?.to_digit(10)?).ok()?;
    Some(((integer, decimal), chars.as_str()))
}

fn apply_command(line: &str, line_number: usize, state: &mut ScanState) {
    state.command_count = state.command_count.saturating_add(1);

    let upper = line.to_ascii_uppercase();
    for mode in codes(&upper, 'G').filter_map(InterpolationMode::from_code) {
        state.draw.mode = mode;
    }
    let operation = codes(&upper, 'D').filter_map(Operation::from_code).last();

    let draw = &state.draw;
    let next_x = find_field(line, 'X')
        .map(|token| decode(token, draw.x_format))
        .or(draw.current_x);
    let next_y = find_field(line, 'Y')
        .map(|token| decode(token, draw.y_format))
        .or(draw.current_y);

    if operation == Some(Operation::Draw) {
        match (draw.current_point(), next_x, next_y) {
            (Some(from), Some(x), Some(y)) => {
                let to = Point { x, y };
                match interpolate(from, to, line, draw) {
                    Some(entity) => state.entities.push(entity),
                    None => state.warn(format!(
                        "line {line_number}: arc with zero radius skipped"
                    )),
                }
            }
            _ => state.warn(format!(
                "line {line_number}: draw skipped: current position is not resolved"
            )),
        }
    }

    state.draw.current_x = next_x;
    state.draw.current_y = next_y;
}

/// Numbers following each occurrence of `letter`, e.g. `G01X5D02` yields
/// `[1]` for `G` and `[2]` for `D`.
fn codes(line: &str, letter: char) -> impl Iterator<Item = u32> + '_ {
    line.match_indices(letter).filter_map(move |(idx, _)| {
        let digits = line.get(idx + letter.len_utf8()..)?;
        let len = digits.bytes().take_while(u8::is_ascii_digit).count();
        digits.get(..len)?.parse().ok()
    })
}

fn interpolate(from: Point, to: Point, line: &str, draw: &DrawState) -> Option<OutlineEntity> {
    if draw.mode == InterpolationMode::Linear {
        return Some(OutlineEntity::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        });
    }

    let offset_i = find_field(line, 'I').map_or(0.0, |token| decode(token, draw.x_format));
    let offset_j = find_field(line, 'J').map_or(0.0, |token| decode(token, draw.y_format));
    let center = Point {
        x: from.x + offset_i,
        y: from.y + offset_j,
    };

    let radius = from.distance(center);
    if radius <= MIN_ARC_RADIUS {
        return None;
    }

    let mut start_angle = angle_degrees(center, from);
    let mut end_angle = angle_degrees(center, to);
    // Stored arcs run counter-clockwise, so clockwise motion swaps its ends.
    if draw.mode == InterpolationMode::ClockwiseArc {
        std::mem::swap(&mut start_angle, &mut end_angle);
    }

    Some(OutlineEntity::Arc {
        cx: center.x,
        cy: center.y,
        radius,
        start_angle,
        end_angle,
    })
}

/// Direction of `point` seen from `center`, in degrees within `[0, 360)`.
fn angle_degrees(center: Point, point: Point) -> f64 {
    let degrees = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    // `+ 0.0` folds -0.0 into 0.0.
    degrees.rem_euclid(360.0) + 0.0
}

fn finish(state: ScanState) -> OutlineResult {
    let units = state.draw.units;
    let factor = units.mm_factor();

    let entities: Vec<OutlineEntity> = state
        .entities
        .into_iter()
        .map(|entity| entity.scaled(factor))
        .collect();

    let mut bounds = BoundingBox::new();
    for entity in &entities {
        bounds.include(entity);
    }

    debug!(
        entities = entities.len(),
        ?units,
        commands = state.command_count,
        "outline extracted"
    );

    OutlineResult {
        entities,
        units,
        bounds,
        command_count: state.command_count,
        warnings: state.warnings,
    }
}
