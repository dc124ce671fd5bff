use thiserror::Error;

use super::geometry::{DistanceMatrix, GeometryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("frame field lengths disagree: {numbers} atomic numbers, {symbols} symbols, {positions} positions")]
pub struct FrameLengthError {
    pub numbers: usize,
    pub symbols: usize,
    pub positions: usize,
}

/// Internal flat record: raw number/symbol/position sequences plus a
/// mandatory periodic cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub numbers: Vec<u8>,
    pub symbols: Vec<String>,
    pub positions: Vec<[f64; 3]>,
    pub cell: [[f64; 3]; 3],
}

impl Frame {
    /// Builds a frame, validating that the per-atom sequences agree in length.
    pub fn new(
        numbers: Vec<u8>,
        symbols: Vec<String>,
        positions: Vec<[f64; 3]>,
        cell: [[f64; 3]; 3],
    ) -> Result<Self, FrameLengthError> {
        if numbers.len() != symbols.len() || numbers.len() != positions.len() {
            return Err(FrameLengthError {
                numbers: numbers.len(),
                symbols: symbols.len(),
                positions: positions.len(),
            });
        }
        Ok(Self {
            numbers,
            symbols,
            positions,
            cell,
        })
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.numbers.len()
    }

    /// Full pairwise minimum-image distance matrix under `cell`.
    pub fn periodic_distances(&self) -> Result<DistanceMatrix, GeometryError> {
        DistanceMatrix::minimum_image(&self.positions, &self.cell)
    }
}
