//! Fixed-column decoding of PDB `ATOM`/`HETATM` records.
//!
//! Only the first model is read: decoding stops at the first line starting
//! with `END` (which also covers `ENDMDL`).

use glam::Vec3;

use super::atom::AtomRecord;
use crate::error::VantageError;

fn is_atom_line(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Trimmed column `[start, end)`, clamped to the line length.
fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).map_or("", str::trim)
}

fn coordinate(
    line: &str,
    line_no: usize,
    start: usize,
    axis: char,
) -> Result<f32, VantageError> {
    let text = column(line, start, start + 8);
    let value = text.parse::<f32>().map_err(|e| VantageError::Parse {
        line: line_no,
        message: format!("invalid {axis} coordinate {text:?}: {e}"),
    })?;
    if !value.is_finite() {
        return Err(VantageError::Parse {
            line: line_no,
            message: format!("non-finite {axis} coordinate {text:?}"),
        });
    }
    Ok(value)
}

/// Decode a single atom line. `line_no` is 1-based and only used for error
/// reporting.
pub fn parse_atom_line(
    line: &str,
    line_no: usize,
) -> Result<AtomRecord, VantageError> {
    let x = coordinate(line, line_no, 30, 'x')?;
    let y = coordinate(line, line_no, 38, 'y')?;
    let z = coordinate(line, line_no, 46, 'z')?;
    Ok(AtomRecord {
        position: Vec3::new(x, y, z),
        chain: column(line, 21, 22).to_owned(),
        res_num: column(line, 22, 27).to_owned(),
        res_type: column(line, 17, 20).to_owned(),
        name: column(line, 12, 16).to_owned(),
        element: column(line, 76, 78).to_owned(),
        alt: column(line, 16, 17).to_owned(),
    })
}

/// Decode every atom record of the first model in `text`.
///
/// A malformed coordinate aborts decoding entirely.
pub fn parse_atom_records(text: &str) -> Result<Vec<AtomRecord>, VantageError> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if is_atom_line(line) {
            records.push(parse_atom_line(line, i + 1)?);
        } else if line.starts_with("END") {
            break;
        }
    }
    Ok(records)
}
