//! Candidate storage in the ASE JSON database format
//!
//! The database is a single JSON object. Every row is stored under its id as key, next to the
//! bookkeeping entries `ids` and `nextid`:
//!
//! ```text
//! {"1": {"numbers": [79, 29], "positions": [[0, 0, 0], [0, 0, 2.5]],
//!        "key_value_pairs": {"raw_score": -3.2, "relaxed": 1}},
//!  "ids": [1], "nextid": 2}
//! ```
//!
//! Arrays are either nested lists or `{"__ndarray__": [shape, dtype, flat values]}` objects. The
//! file is read once when the store is opened. SQLite databases are recognised by their header
//! and rejected, `ase db gadb.db --insert-into gadb.json` converts them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::atoms::Atoms;
use crate::candidate::Candidate;
use crate::error::{CandidateError, Result};

const SQLITE_HEADER: &[u8] = b"SQLite format 3\0";

#[derive(Debug, Deserialize)]
struct RawRow {
    numbers: Value,
    positions: Value,
    #[serde(default)]
    cell: Option<Value>,
    #[serde(default)]
    pbc: Option<Value>,
    #[serde(default)]
    key_value_pairs: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize)]
struct WrittenRow<'a> {
    numbers: &'a [u8],
    positions: Vec<Vec<f64>>,
    cell: Vec<Vec<f64>>,
    pbc: [bool; 3],
    key_value_pairs: &'a BTreeMap<String, Value>,
}

fn scalar(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("{} is not a float", n)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(format!("expected a number, found {}", other)),
    }
}

fn flatten_nested(
    value: &Value,
    depth: usize,
    shape: &mut Vec<usize>,
    flat: &mut Vec<f64>,
) -> std::result::Result<(), String> {
    match value {
        Value::Array(items) => {
            if shape.len() == depth {
                shape.push(items.len());
            } else if shape[depth] != items.len() {
                return Err("nested lists are not rectangular".into());
            }
            for item in items {
                flatten_nested(item, depth + 1, shape, flat)?;
            }
            Ok(())
        }
        other => {
            if shape.len() != depth {
                return Err("nested lists are not rectangular".into());
            }
            flat.push(scalar(other)?);
            Ok(())
        }
    }
}

/// Shape and flat values of an encoded array
fn decode_array(value: &Value) -> std::result::Result<(Vec<usize>, Vec<f64>), String> {
    if let Some(encoded) = value.get("__ndarray__") {
        let parts = encoded
            .as_array()
            .filter(|parts| parts.len() == 3)
            .ok_or("`__ndarray__` needs shape, dtype and values")?;
        let shape = parts[0]
            .as_array()
            .ok_or("`__ndarray__` shape is not a list")?
            .iter()
            .map(|dim| dim.as_u64().map(|d| d as usize).ok_or("invalid dimension"))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let flat = parts[2]
            .as_array()
            .ok_or("`__ndarray__` values are not a list")?
            .iter()
            .map(scalar)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if shape.iter().product::<usize>() != flat.len() {
            return Err(format!(
                "shape {:?} does not match {} values",
                shape,
                flat.len()
            ));
        }
        return Ok((shape, flat));
    }

    // newer versions store the cell as `{"array": ..., "__ase_objtype__": "cell"}`
    if let Some(array) = value.get("array") {
        return decode_array(array);
    }

    let mut shape = Vec::new();
    let mut flat = Vec::new();
    flatten_nested(value, 0, &mut shape, &mut flat)?;

    Ok((shape, flat))
}

fn decode_numbers(value: &Value) -> std::result::Result<Vec<u8>, String> {
    let (_, flat) = decode_array(value)?;
    flat.into_iter()
        .map(|z| {
            if z.fract() == 0.0 && (0.0..=255.0).contains(&z) {
                Ok(z as u8)
            } else {
                Err(format!("{} is not an atomic number", z))
            }
        })
        .collect()
}

fn decode_matrix(value: &Value, nrows: usize) -> std::result::Result<Array2<f64>, String> {
    let (shape, flat) = decode_array(value)?;
    if flat.len() != nrows * 3 {
        return Err(format!("expected {} rows of three, found shape {:?}", nrows, shape));
    }

    Array2::from_shape_vec((nrows, 3), flat).map_err(|err| err.to_string())
}

fn decode_row(id: usize, row: Value) -> Result<Candidate> {
    let malformed = |reason: String| CandidateError::MalformedRow { id, reason };

    let raw: RawRow = serde_json::from_value(row).map_err(|err| malformed(err.to_string()))?;
    let numbers = decode_numbers(&raw.numbers).map_err(malformed)?;
    let positions = decode_matrix(&raw.positions, numbers.len()).map_err(malformed)?;
    let mut atoms = Atoms::new(numbers, positions)?;

    if let Some(cell) = &raw.cell {
        let cell = decode_matrix(cell, 3).map_err(malformed)?;
        let pbc = match &raw.pbc {
            Some(pbc) => {
                let (_, flat) = decode_array(pbc).map_err(malformed)?;
                if flat.len() != 3 {
                    return Err(malformed(format!("pbc needs three flags, found {}", flat.len())));
                }
                [flat[0] != 0.0, flat[1] != 0.0, flat[2] != 0.0]
            }
            None => [false; 3],
        };
        atoms = atoms.with_cell(cell, pbc)?;
    }

    Ok(Candidate::new(id, atoms).with_key_value_pairs(raw.key_value_pairs))
}

/// All rows of a candidate database
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
}

impl CandidateStore {
    /// Read the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<CandidateStore> {
        let path = path.as_ref();
        log::info!("reading candidates from {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        if reader.fill_buf()?.starts_with(SQLITE_HEADER) {
            return Err(CandidateError::SqliteDatabase(path.to_path_buf()));
        }

        CandidateStore::from_reader(reader)
    }

    /// Parse a database from any reader
    ///
    /// Malformed rows are skipped with a warning. Invalid JSON and atoms of an element without
    /// tabulated data are errors.
    pub fn from_reader<R: Read>(reader: R) -> Result<CandidateStore> {
        let document: BTreeMap<String, Value> = serde_json::from_reader(reader)?;

        let mut candidates = Vec::with_capacity(document.len());
        for (key, row) in document {
            let id = match key.parse::<usize>() {
                Ok(id) => id,
                Err(_) => continue,
            };

            match decode_row(id, row) {
                Ok(candidate) => candidates.push(candidate),
                Err(err @ CandidateError::UnknownElement(_)) => return Err(err),
                Err(err) => log::warn!("skipping row {}: {}", id, err),
            }
        }
        candidates.sort_by_key(Candidate::id);

        log::debug!("decoded {} candidate rows", candidates.len());

        Ok(CandidateStore { candidates })
    }

    pub fn from_candidates(mut candidates: Vec<Candidate>) -> CandidateStore {
        candidates.sort_by_key(Candidate::id);
        CandidateStore { candidates }
    }

    /// All rows ordered by id
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Candidate> {
        self.candidates
            .binary_search_by_key(&id, Candidate::id)
            .ok()
            .map(|idx| &self.candidates[idx])
    }

    /// Relaxed candidates sorted by decreasing raw score
    ///
    /// Extinct candidates are left out unless `use_extinct` is set. Relaxed candidates without a
    /// raw score cannot be ranked and are skipped with a warning.
    pub fn get_all_relaxed_candidates(&self, use_extinct: bool) -> Vec<Candidate> {
        let mut relaxed = self
            .candidates
            .iter()
            .filter(|c| c.is_relaxed() && (use_extinct || !c.is_extinct()))
            .filter(|c| {
                if c.raw_score().is_none() {
                    log::warn!("relaxed candidate {} has no raw score", c.id());
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect::<Vec<_>>();

        relaxed.sort_by(|a, b| {
            b.raw_score()
                .partial_cmp(&a.raw_score())
                .unwrap_or(Ordering::Equal)
        });

        log::info!(
            "{} of {} candidates are relaxed",
            relaxed.len(),
            self.candidates.len()
        );

        relaxed
    }

    /// Write all rows as ASE JSON database
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut document = serde_json::Map::new();
        for candidate in &self.candidates {
            let atoms = candidate.atoms();
            let row = WrittenRow {
                numbers: atoms.numbers(),
                positions: atoms.positions().outer_iter().map(|r| r.to_vec()).collect(),
                cell: atoms.cell().outer_iter().map(|r| r.to_vec()).collect(),
                pbc: atoms.pbc(),
                key_value_pairs: candidate.key_value_pairs(),
            };
            document.insert(candidate.id().to_string(), serde_json::to_value(row)?);
        }

        let ids = self.candidates.iter().map(Candidate::id).collect::<Vec<_>>();
        let nextid = ids.iter().max().map(|id| id + 1).unwrap_or(1);
        document.insert("ids".into(), ids.into());
        document.insert("nextid".into(), nextid.into());

        serde_json::to_writer(writer, &Value::Object(document))?;

        Ok(())
    }

    /// Write all rows to the database file at `path`
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
