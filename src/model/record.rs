//! The two accepted record shapes, behind one closed enum.
//!
//! Typed callers construct [`StructureRecord`] values directly; untyped data
//! (tagged JSON documents) enters through [`StructureRecord::from_value`],
//! which is where unrecognized shapes surface as [`RecordError`]s.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::atom::Atom;
use super::frame::Frame;
use super::geometry::{DistanceMatrix, GeometryError};
use super::structure::Structure;
use super::types::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unrecognized record kind '{0}'")]
    UnsupportedKind(String),

    #[error("record is not an object with a string 'kind' field")]
    MissingKind,

    #[error("malformed '{kind}' record: {detail}")]
    Malformed { kind: &'static str, detail: String },
}

impl RecordError {
    fn malformed(kind: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            kind,
            detail: detail.into(),
        }
    }
}

/// An atomic-structure record in one of the two accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureRecord {
    /// Library-native structure with typed atoms ("atoms" kind).
    Structure(Structure),
    /// Internal flat record with raw sequences ("system" kind).
    Frame(Frame),
}

impl StructureRecord {
    pub fn atom_count(&self) -> usize {
        match self {
            Self::Structure(s) => s.atom_count(),
            Self::Frame(f) => f.atom_count(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structure(_) => "atoms",
            Self::Frame(_) => "system",
        }
    }

    /// Full pairwise distance matrix, with the periodic convention delegated
    /// to the variant.
    pub fn distance_matrix(&self) -> Result<DistanceMatrix, GeometryError> {
        match self {
            Self::Structure(s) => s.distance_matrix(),
            Self::Frame(f) => f.periodic_distances(),
        }
    }

    /// Constructs a record from a tagged JSON value.
    ///
    /// Accepted shapes:
    ///
    /// ```json
    /// {"kind": "atoms", "symbols": [...], "positions": [...], "cell": [...]}
    /// {"kind": "system", "numbers": [...], "symbols": [...], "positions": [...], "cell": [...]}
    /// ```
    ///
    /// `cell` is optional for "atoms" and mandatory for "system". Any other
    /// shape is an error; there is no recovery.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingKind)?;

        match kind {
            "atoms" => {
                let doc: AtomsDoc = serde_json::from_value(value.clone())
                    .map_err(|e| RecordError::malformed("atoms", e.to_string()))?;
                doc.into_record()
            }
            "system" => {
                let doc: SystemDoc = serde_json::from_value(value.clone())
                    .map_err(|e| RecordError::malformed("system", e.to_string()))?;
                doc.into_record()
            }
            other => Err(RecordError::UnsupportedKind(other.to_string())),
        }
    }
}

impl From<Structure> for StructureRecord {
    fn from(structure: Structure) -> Self {
        Self::Structure(structure)
    }
}

impl From<Frame> for StructureRecord {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

#[derive(Deserialize)]
struct AtomsDoc {
    symbols: Vec<String>,
    positions: Vec<[f64; 3]>,
    #[serde(default)]
    cell: Option<[[f64; 3]; 3]>,
}

impl AtomsDoc {
    fn into_record(self) -> Result<StructureRecord, RecordError> {
        if self.symbols.len() != self.positions.len() {
            return Err(RecordError::malformed(
                "atoms",
                format!(
                    "{} symbols but {} positions",
                    self.symbols.len(),
                    self.positions.len()
                ),
            ));
        }

        let mut atoms = Vec::with_capacity(self.symbols.len());
        for (symbol, position) in self.symbols.iter().zip(&self.positions) {
            let element = Element::from_str(symbol)
                .map_err(|e| RecordError::malformed("atoms", e.to_string()))?;
            atoms.push(Atom::new(element, *position));
        }

        Ok(StructureRecord::Structure(Structure {
            atoms,
            box_vectors: self.cell,
        }))
    }
}

#[derive(Deserialize)]
struct SystemDoc {
    numbers: Vec<u8>,
    symbols: Vec<String>,
    positions: Vec<[f64; 3]>,
    cell: [[f64; 3]; 3],
}

impl SystemDoc {
    fn into_record(self) -> Result<StructureRecord, RecordError> {
        let frame = Frame::new(self.numbers, self.symbols, self.positions, self.cell)
            .map_err(|e| RecordError::malformed("system", e.to_string()))?;
        Ok(StructureRecord::Frame(frame))
    }
}
