//! Yosys statistics report parser.
//!
//! The tool may print several `=== design hierarchy ===` sections as it runs
//! optimization passes; only the last one describes the final netlist. Inside
//! that section the parser reads the leading-number summary lines
//! (`3054 cells`, `2418 wires`, `4 public wires`, ...) and the per-type
//! lines of the form `<count> <cell-type-token>`.
//!
//! Parsing is total: anything that does not match is skipped and the
//! corresponding count stays at zero.

use crate::cells::CellKind;
use crate::record::{ParsedRecord, StructuralCounts};
use mulscope_common::Variant;

/// Header line that opens a hierarchy summary.
pub const HIERARCHY_HEADER: &str = "=== design hierarchy ===";

/// Parses one variant's synthesis report into structural counts.
///
/// Returns a record with all counts at zero when the text holds no
/// hierarchy section.
pub fn parse_report(variant: Variant, text: &str) -> ParsedRecord {
    let counts = last_hierarchy_section(text)
        .map(parse_section)
        .unwrap_or_default();
    ParsedRecord::new(variant, counts)
}

/// Returns the last hierarchy section, from its header up to the next line
/// starting with `===` or the end of the text.
pub fn last_hierarchy_section(text: &str) -> Option<&str> {
    let start = text.rfind(HIERARCHY_HEADER)?;
    let body = start + HIERARCHY_HEADER.len();
    let end = text[body..]
        .find("\n===")
        .map_or(text.len(), |offset| body + offset);
    Some(&text[start..end])
}

fn parse_section(section: &str) -> StructuralCounts {
    let mut counts = StructuralCounts {
        total_cells: leading_count(section, "cells").unwrap_or(0),
        wires: leading_count(section, "wires").unwrap_or(0),
        public_wires: leading_count(section, "public wires").unwrap_or(0),
        memories: leading_count(section, "memories").unwrap_or(0),
        processes: leading_count(section, "processes").unwrap_or(0),
        ..Default::default()
    };

    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((count, token)) = parse_cell_line(line) {
            // Later lines for the same type replace earlier ones
            if let Some(kind) = CellKind::from_token(token) {
                counts.cells.set(kind, count);
            }
        }
    }

    counts
}

/// Finds the first `<digits><whitespace><keyword>` in `text` and returns the
/// number. A number that does not fit in `u64` yields `None`.
fn leading_count(text: &str, keyword: &str) -> Option<u64> {
    text.match_indices(keyword)
        .find_map(|(pos, _)| digits_before(&text[..pos]))
        .and_then(|digits| digits.parse().ok())
}

/// Returns the digit run that ends `prefix` once at least one trailing
/// whitespace character has been stripped.
fn digits_before(prefix: &str) -> Option<&str> {
    let trimmed = prefix.trim_end();
    if trimmed.len() == prefix.len() {
        return None;
    }
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&trimmed[start..])
}

/// Splits a trimmed line of the form `<count> <token> ...` into its count
/// and cell-type token.
fn parse_cell_line(line: &str) -> Option<(u64, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = &line[digits_end..];
    let token_part = rest.trim_start();
    if token_part.len() == rest.len() {
        return None;
    }
    let token = cell_token(token_part)?;
    let count = line[..digits_end].parse().ok()?;
    Some((count, token))
}

/// Extracts the leading cell-type token: `$_` + uppercase letters + `_` for
/// internal primitives, otherwise `$` + word characters.
fn cell_token(s: &str) -> Option<&str> {
    let tail = s.strip_prefix('$')?;
    if let Some(primitive) = tail.strip_prefix('_') {
        let upper = primitive
            .bytes()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        if upper > 0 && primitive.as_bytes().get(upper) == Some(&b'_') {
            return Some(&s[..upper + 3]);
        }
    }
    let word: usize = tail
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    if word == 0 {
        None
    } else {
        Some(&s[..word + 1])
    }
}
