use crate::bsp::VertexId;
use crate::error::{Error, Result};
use crate::kmeans::PointRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a single `<id>\t<x> <y>` record. `line` is the 1-based line
/// number used in error messages.
pub fn parse_record(text: &str, line: usize) -> Result<PointRecord> {
    let malformed = |reason: String| Error::Parse { line, reason };

    let (id, coordinates) = text
        .split_once('\t')
        .ok_or_else(|| malformed("expected a tab after the id".into()))?;
    let id = id
        .trim()
        .parse::<VertexId>()
        .map_err(|e| malformed(format!("bad id {:?}: {}", id, e)))?;

    let mut fields = coordinates.split_whitespace();
    let mut coordinate = |axis: &str| -> Result<f64> {
        let field = fields
            .next()
            .ok_or_else(|| malformed(format!("missing {} coordinate", axis)))?;
        let value = field
            .parse::<f64>()
            .map_err(|e| malformed(format!("bad {} coordinate {:?}: {}", axis, field, e)))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(malformed(format!("{} coordinate is not finite", axis)))
        }
    };
    let x = coordinate("x")?;
    let y = coordinate("y")?;
    if let Some(extra) = fields.next() {
        return Err(malformed(format!("unexpected trailing field {:?}", extra)));
    }

    Ok(PointRecord::new(id, x, y))
}

/// Reads every record from `reader`, skipping blank lines.
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<PointRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(&line, index + 1)?);
    }
    Ok(records)
}

pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<PointRecord>> {
    let file = File::open(path)?;
    read_points(BufReader::new(file))
}
