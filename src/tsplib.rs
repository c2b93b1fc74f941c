//! Minimal TSPLIB reader for coordinate instances.
//!
//! Reads the `KEY : VALUE` header and the `(id, x, y)` records of the
//! `NODE_COORD_SECTION`. The trailing `EOF` marker is optional. Every
//! instance is treated as planar Euclidean regardless of its
//! `EDGE_WEIGHT_TYPE`.

use std::path::Path;

use log::debug;

use crate::error::{Result, TspError};
use crate::instance::{PointSet, Record};

/// A parsed TSPLIB file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub dimension: Option<usize>,
    pub edge_weight_type: Option<String>,
    pub records: Vec<Record>,
}

impl Instance {
    /// Builds the re-indexed point set from the records.
    pub fn point_set(&self) -> Result<PointSet> {
        PointSet::from_records(self.records.iter().copied())
    }
}

/// Parses TSPLIB text.
///
/// # Examples
///
/// ```
/// use u_tsp::tsplib;
///
/// let text = "NAME : tiny\nDIMENSION : 3\nNODE_COORD_SECTION\n1 0 0\n2 3  4\n3 6 0\nEOF\n";
/// let instance = tsplib::parse(text).unwrap();
/// assert_eq!(instance.name.as_deref(), Some("tiny"));
/// assert_eq!(instance.records.len(), 3);
/// assert_eq!(instance.point_set().unwrap().len(), 3);
/// ```
pub fn parse(text: &str) -> Result<Instance> {
    let mut instance = Instance::default();
    let mut lines = text.lines().enumerate();
    let mut in_section = false;

    for (idx, line) in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "NODE_COORD_SECTION" {
            in_section = true;
            break;
        }
        if line == "EOF" {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(TspError::parse(idx + 1, format!("expected `KEY : VALUE`, got `{line}`")));
        };
        let value = value.trim().to_string();
        match key.trim() {
            "NAME" => instance.name = Some(value),
            "COMMENT" => instance.comment = Some(value),
            "EDGE_WEIGHT_TYPE" => instance.edge_weight_type = Some(value),
            "DIMENSION" => {
                let dimension = value
                    .parse()
                    .map_err(|_| TspError::parse(idx + 1, format!("invalid DIMENSION `{value}`")))?;
                instance.dimension = Some(dimension);
            }
            _ => {}
        }
    }

    if !in_section {
        return Err(TspError::parse(0, "missing NODE_COORD_SECTION"));
    }

    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }
        instance.records.push(parse_record(line, idx + 1)?);
    }

    if let Some(dimension) = instance.dimension {
        if dimension != instance.records.len() {
            return Err(TspError::parse(
                0,
                format!(
                    "DIMENSION is {dimension} but {} coordinates were read",
                    instance.records.len()
                ),
            ));
        }
    }

    debug!(
        "tsplib: parsed {} records for {:?}",
        instance.records.len(),
        instance.name
    );
    Ok(instance)
}

/// Parses TSPLIB text and keeps only the coordinate records, in file order.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    parse(text).map(|instance| instance.records)
}

/// Reads and parses a TSPLIB file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn parse_record(line: &str, line_no: usize) -> Result<Record> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(TspError::parse(
            line_no,
            format!("expected `id x y`, got {} fields", fields.len()),
        ));
    }
    let id = fields[0]
        .parse()
        .map_err(|_| TspError::parse(line_no, format!("invalid id `{}`", fields[0])))?;
    let x = fields[1]
        .parse()
        .map_err(|_| TspError::parse(line_no, format!("invalid x `{}`", fields[1])))?;
    let y = fields[2]
        .parse()
        .map_err(|_| TspError::parse(line_no, format!("invalid y `{}`", fields[2])))?;
    Ok(Record { id, x, y })
}
