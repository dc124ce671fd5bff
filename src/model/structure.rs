use super::atom::Atom;
use super::geometry::{DistanceMatrix, GeometryError};

/// Library-native atomic structure: typed atoms plus optional box vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub atoms: Vec<Atom>,
    pub box_vectors: Option<[[f64; 3]; 3]>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            box_vectors: None,
        }
    }

    pub fn with_box_vectors(atoms: Vec<Atom>, box_vectors: [[f64; 3]; 3]) -> Self {
        Self {
            atoms,
            box_vectors: Some(box_vectors),
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.box_vectors.is_some()
    }

    /// Full pairwise distance matrix.
    ///
    /// Honors the minimum-image convention when box vectors are present;
    /// plain Cartesian distances otherwise.
    pub fn distance_matrix(&self) -> Result<DistanceMatrix, GeometryError> {
        let positions: Vec<[f64; 3]> = self.atoms.iter().map(|a| a.position).collect();
        match &self.box_vectors {
            Some(box_vectors) => DistanceMatrix::minimum_image(&positions, box_vectors),
            None => Ok(DistanceMatrix::direct(&positions)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;

    #[test]
    fn non_periodic_uses_direct_distances() {
        let structure = Structure::from_atoms(vec![
            Atom::new(Element::H, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.0, 0.0, 0.74]),
        ]);

        assert!(!structure.is_periodic());
        let matrix = structure.distance_matrix().unwrap();
        assert!((matrix.get(0, 1) - 0.74).abs() < 1e-12);
    }

    #[test]
    fn periodic_uses_minimum_image() {
        let cell = [[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]];
        let structure = Structure::with_box_vectors(
            vec![
                Atom::new(Element::Ar, [0.5, 0.0, 0.0]),
                Atom::new(Element::Ar, [9.5, 0.0, 0.0]),
            ],
            cell,
        );

        assert!(structure.is_periodic());
        let matrix = structure.distance_matrix().unwrap();
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_structure_has_empty_matrix() {
        let structure = Structure::new();
        let matrix = structure.distance_matrix().unwrap();
        assert_eq!(matrix.n_atoms(), 0);
    }
}
