//! Excellon drill extractor.
//!
//! Tracks units, the tool table, the selected tool and the current position,
//! and turns every coordinate line into a hole once all of them are known.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::coord::{find_field, number_prefix};

use super::types::{DrillResult, ExcellonUnits, HoleFilter, HoleRecord, ToolDefinition};

const IGNORED_DIRECTIVES: [&str; 5] = ["M48", "%", "G90", "G05", "M30"];

#[derive(Debug)]
struct ParserState {
    units: ExcellonUnits,
    declared_units: bool,
    tools: HashMap<u32, f64>,
    current_tool: Option<u32>,
    current_x: Option<f64>,
    current_y: Option<f64>,
    holes: Vec<HoleRecord>,
    filtered_count: u32,
    warnings: Vec<String>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            units: ExcellonUnits::Imperial,
            declared_units: false,
            tools: HashMap::new(),
            current_tool: None,
            current_x: None,
            current_y: None,
            holes: Vec::new(),
            filtered_count: 0,
            warnings: Vec::new(),
        }
    }
}

impl ParserState {
    fn warn(&mut self, msg: String) {
        warn!("{msg}");
        self.warnings.push(msg);
    }
}

/// Extract holes whose diameter passes `filter` from Excellon drill text.
///
/// Never fails. Coordinates are read as plain decimals, and both positions
/// and diameters are converted with the unit mode active at the hole.
pub fn extract(text: &str, filter: HoleFilter) -> DrillResult {
    let mut state = ParserState::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        let normalized = line.to_ascii_uppercase();

        if apply_units_directive(&normalized, &mut state) {
            continue;
        }

        if let Some((tool_number, diameter)) = parse_tool_definition(&normalized) {
            register_tool(&mut state, tool_number, diameter);
            continue;
        }

        if let Some(tool_number) = parse_tool_selection(&normalized) {
            state.current_tool = Some(tool_number);
            continue;
        }

        if is_ignored_directive(&normalized) {
            continue;
        }

        if normalized.starts_with(['X', 'Y']) {
            apply_coordinates(&normalized, index + 1, filter, &mut state);
        }
    }

    let mut tools: Vec<ToolDefinition> = state
        .tools
        .into_iter()
        .map(|(number, diameter)| ToolDefinition { number, diameter })
        .collect();
    tools.sort_by_key(|tool| tool.number);

    debug!(
        holes = state.holes.len(),
        filtered = state.filtered_count,
        tools = tools.len(),
        "drill file extracted"
    );

    DrillResult {
        holes: state.holes,
        tools,
        units: state.units,
        filtered_count: state.filtered_count,
        warnings: state.warnings,
    }
}

fn apply_units_directive(line: &str, state: &mut ParserState) -> bool {
    let units = if line.starts_with("METRIC") {
        ExcellonUnits::Metric
    } else if line.starts_with("INCH") {
        ExcellonUnits::Imperial
    } else {
        return false;
    };

    if state.declared_units && state.units != units {
        state.warn("mixed unit declarations detected; last declaration wins".to_string());
    }

    debug!(?units, "drill units directive");
    state.units = units;
    state.declared_units = true;
    true
}

fn register_tool(state: &mut ParserState, tool_number: u32, diameter: f64) {
    if state.tools.insert(tool_number, diameter).is_some() {
        state.warn(format!(
            "duplicate tool definition for T{tool_number}; last definition wins"
        ));
    }
}

/// `T<n>C<diameter>` filling the whole line.
fn parse_tool_definition(line: &str) -> Option<(u32, f64)> {
    let (tool_raw, diameter_raw) = line.strip_prefix('T')?.split_once('C')?;

    if tool_raw.is_empty() || !tool_raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if number_prefix(diameter_raw) != Some(diameter_raw) {
        return None;
    }

    let tool_number = tool_raw.parse::<u32>().ok()?;
    let diameter = diameter_raw.parse::<f64>().ok()?;
    Some((tool_number, diameter))
}

/// `T<n>` filling the whole line.
fn parse_tool_selection(line: &str) -> Option<u32> {
    let tool_raw = line.strip_prefix('T')?;
    if tool_raw.is_empty() || !tool_raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tool_raw.parse::<u32>().ok()
}

fn is_ignored_directive(line: &str) -> bool {
    IGNORED_DIRECTIVES.contains(&line) || line.starts_with("FMAT")
}

fn apply_coordinates(line: &str, line_number: usize, filter: HoleFilter, state: &mut ParserState) {
    if let Some(x) = find_field(line, 'X').and_then(|raw| raw.parse::<f64>().ok()) {
        state.current_x = Some(x);
    }
    if let Some(y) = find_field(line, 'Y').and_then(|raw| raw.parse::<f64>().ok()) {
        state.current_y = Some(y);
    }

    let Some(tool_number) = state.current_tool else {
        state.warn(format!("line {line_number}: hole skipped: no tool selected"));
        return;
    };
    let (Some(x), Some(y)) = (state.current_x, state.current_y) else {
        state.warn(format!(
            "line {line_number}: hole skipped: position is not resolved"
        ));
        return;
    };
    let Some(native_diameter) = state.tools.get(&tool_number).copied() else {
        state.warn(format!(
            "line {line_number}: hole skipped: selected tool T{tool_number} is undefined"
        ));
        return;
    };

    let factor = state.units.mm_factor();
    let diameter = native_diameter * factor;
    if !filter.accepts(diameter) {
        state.filtered_count = state.filtered_count.saturating_add(1);
        return;
    }

    state.holes.push(HoleRecord {
        x: x * factor,
        y: y * factor,
        diameter,
    });
}
