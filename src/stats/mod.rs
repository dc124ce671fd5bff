//! Aggregate statistics over collections of atomic-structure records.
//!
//! A single pass over the input folds every record into a
//! [`StatsAccumulator`]; the fold is associative and commutative (max,
//! set union, min), so sub-sequences may be folded independently and
//! combined with [`StatsAccumulator::merge`].

mod error;

pub use error::StatsError;

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::model::geometry::GeometryError;
use crate::model::record::StructureRecord;

/// Which entries of the distance matrix feed the minimum distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinDistanceConvention {
    /// Scan the upper triangle including the zero diagonal.
    ///
    /// Self-distances participate, so any record with at least one atom
    /// drives the reported minimum to zero. This reproduces the historical
    /// behavior and is the default.
    #[default]
    WithSelfPairs,

    /// Scan the strict upper triangle: distances between distinct atom
    /// pairs only. A record with a single atom still contributes its
    /// trivial self-distance of zero.
    DistinctPairs,
}

/// Options for [`compute_stats_with`] and [`compute_stats_from_values`].
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    pub min_distance: MinDistanceConvention,
}

/// Aggregate statistics for a record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    /// Maximum atom count over all records.
    pub n_atoms_max: usize,
    /// Distinct atomic numbers, sorted ascending.
    pub atomic_numbers: Vec<u8>,
    /// Distinct chemical symbols, sorted lexicographically.
    pub element_symbols: Vec<String>,
    /// Global minimum distance; `None` when the input was empty.
    pub min_distance: Option<f64>,
}

/// Running aggregates for one statistics pass.
///
/// Public so callers can split an input, fold the parts independently, and
/// [`merge`](Self::merge) the partial results.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    n_atoms_max: usize,
    atomic_numbers: BTreeSet<u8>,
    element_symbols: BTreeSet<String>,
    min_distance: Option<f64>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the running aggregates.
    ///
    /// # Errors
    ///
    /// Propagates the record's distance-matrix failure; the accumulator
    /// must then be discarded, since the element sets have already been
    /// updated for the failing record.
    pub fn observe(
        &mut self,
        record: &StructureRecord,
        options: &StatsOptions,
    ) -> Result<(), GeometryError> {
        let n = record.atom_count();

        match record {
            StructureRecord::Structure(structure) => {
                for atom in &structure.atoms {
                    self.atomic_numbers.insert(atom.element.atomic_number());
                    self.element_symbols.insert(atom.element.symbol().to_string());
                }
            }
            StructureRecord::Frame(frame) => {
                self.atomic_numbers.extend(frame.numbers.iter().copied());
                self.element_symbols.extend(frame.symbols.iter().cloned());
            }
        }

        if n > self.n_atoms_max {
            self.n_atoms_max = n;
        }

        let matrix = record.distance_matrix()?;
        let record_min = match options.min_distance {
            MinDistanceConvention::WithSelfPairs => matrix.upper_triangle_min(true),
            // A lone atom has no distinct pairs; its self-distance still counts.
            MinDistanceConvention::DistinctPairs => matrix
                .upper_triangle_min(false)
                .or_else(|| (n > 0).then_some(0.0)),
        };
        if let Some(d) = record_min {
            if self.min_distance.is_none_or(|current| d < current) {
                self.min_distance = Some(d);
            }
        }

        Ok(())
    }

    /// Combines two partial aggregates. Associative and commutative.
    pub fn merge(mut self, other: Self) -> Self {
        if other.n_atoms_max > self.n_atoms_max {
            self.n_atoms_max = other.n_atoms_max;
        }
        self.atomic_numbers.extend(other.atomic_numbers);
        self.element_symbols.extend(other.element_symbols);
        if let Some(d) = other.min_distance {
            if self.min_distance.is_none_or(|current| d < current) {
                self.min_distance = Some(d);
            }
        }
        self
    }

    /// Emits the final result.
    pub fn finish(self) -> SystemStats {
        SystemStats {
            n_atoms_max: self.n_atoms_max,
            atomic_numbers: self.atomic_numbers.into_iter().collect(),
            element_symbols: self.element_symbols.into_iter().collect(),
            min_distance: self.min_distance,
        }
    }
}

/// Computes aggregate statistics with default options.
///
/// The input may be any finite single-pass iterator over records; it is
/// consumed exactly once and never mutated. Empty input yields
/// `n_atoms_max == 0`, empty element sets, and `min_distance == None`.
pub fn compute_stats<'a, I>(records: I) -> Result<SystemStats, StatsError>
where
    I: IntoIterator<Item = &'a StructureRecord>,
{
    compute_stats_with(records, &StatsOptions::default())
}

/// Computes aggregate statistics with explicit options.
pub fn compute_stats_with<'a, I>(records: I, options: &StatsOptions) -> Result<SystemStats, StatsError>
where
    I: IntoIterator<Item = &'a StructureRecord>,
{
    let mut accumulator = StatsAccumulator::new();
    for (index, record) in records.into_iter().enumerate() {
        accumulator
            .observe(record, options)
            .map_err(|source| StatsError::DistanceComputation { index, source })?;
    }
    Ok(accumulator.finish())
}

/// Computes aggregate statistics over heterogeneous tagged JSON values.
///
/// This is the untyped boundary: each value must match one of the two
/// accepted record shapes, and a value matching neither fails the whole
/// call with [`StatsError::UnsupportedRecord`] naming its index.
pub fn compute_stats_from_values<'a, I>(
    values: I,
    options: &StatsOptions,
) -> Result<SystemStats, StatsError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut accumulator = StatsAccumulator::new();
    for (index, value) in values.into_iter().enumerate() {
        let record = StructureRecord::from_value(value)
            .map_err(|source| StatsError::UnsupportedRecord { index, source })?;
        accumulator
            .observe(&record, options)
            .map_err(|source| StatsError::DistanceComputation { index, source })?;
    }
    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::frame::Frame;
    use crate::model::structure::Structure;
    use crate::model::types::Element;
    use serde_json::json;

    const CUBIC_20: [[f64; 3]; 3] = [[20.0, 0.0, 0.0], [0.0, 20.0, 0.0], [0.0, 0.0, 20.0]];

    fn distinct_pairs() -> StatsOptions {
        StatsOptions {
            min_distance: MinDistanceConvention::DistinctPairs,
        }
    }

    /// Water-like structure: 3 atoms, shortest O-H separation 0.96.
    fn water() -> StructureRecord {
        StructureRecord::Structure(Structure::from_atoms(vec![
            Atom::new(Element::O, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.96, 0.0, 0.0]),
            Atom::new(Element::H, [-0.32, 1.02, 0.0]),
        ]))
    }

    /// O2-like frame: 2 atoms at distance 1.2 in a large periodic box.
    fn dioxygen() -> StructureRecord {
        StructureRecord::Frame(
            Frame::new(
                vec![8, 8],
                vec!["O".to_string(), "O".to_string()],
                vec![[0.0, 0.0, 0.0], [1.2, 0.0, 0.0]],
                CUBIC_20,
            )
            .unwrap(),
        )
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let stats = compute_stats(&Vec::new()).unwrap();
        assert_eq!(stats.n_atoms_max, 0);
        assert!(stats.atomic_numbers.is_empty());
        assert!(stats.element_symbols.is_empty());
        assert_eq!(stats.min_distance, None);
    }

    #[test]
    fn aggregates_across_both_variants() {
        let records = vec![water(), dioxygen()];
        let stats = compute_stats(&records).unwrap();

        assert_eq!(stats.n_atoms_max, 3);
        assert_eq!(stats.atomic_numbers, vec![1, 8]);
        assert_eq!(
            stats.element_symbols,
            vec!["H".to_string(), "O".to_string()]
        );
    }

    // The default convention scans the upper triangle including the zero
    // diagonal, so any non-empty record forces the minimum to zero. The
    // DistinctPairs convention below reports the true pairwise minimum
    // instead; both behaviors are pinned deliberately.
    #[test]
    fn min_distance_zero_with_self_pairs() {
        let records = vec![water(), dioxygen()];
        let stats = compute_stats(&records).unwrap();
        assert_eq!(stats.min_distance, Some(0.0));
    }

    #[test]
    fn distinct_pairs_reports_true_minimum() {
        let records = vec![water(), dioxygen()];
        let stats = compute_stats_with(&records, &distinct_pairs()).unwrap();
        let min = stats.min_distance.unwrap();
        assert!((min - 0.96).abs() < 1e-12, "expected 0.96, got {min}");
    }

    #[test]
    fn single_atom_record_yields_zero_under_either_convention() {
        let records = vec![StructureRecord::Structure(Structure::from_atoms(vec![
            Atom::new(Element::He, [0.0, 0.0, 0.0]),
        ]))];

        let stats = compute_stats(&records).unwrap();
        assert_eq!(stats.min_distance, Some(0.0));

        let stats = compute_stats_with(&records, &distinct_pairs()).unwrap();
        assert_eq!(stats.min_distance, Some(0.0));
    }

    #[test]
    fn n_atoms_max_matches_naive_maximum() {
        let records = vec![dioxygen(), water(), dioxygen()];
        let stats = compute_stats(&records).unwrap();

        let naive = records.iter().map(|r| r.atom_count()).max().unwrap();
        assert_eq!(stats.n_atoms_max, naive);
    }

    #[test]
    fn element_sets_have_no_duplicates() {
        let records = vec![water(), water(), dioxygen()];
        let stats = compute_stats(&records).unwrap();

        assert_eq!(stats.atomic_numbers, vec![1, 8]);
        assert_eq!(
            stats.element_symbols,
            vec!["H".to_string(), "O".to_string()]
        );
    }

    #[test]
    fn periodic_minimum_uses_the_nearest_image() {
        let frame = Frame::new(
            vec![18, 18],
            vec!["Ar".to_string(), "Ar".to_string()],
            vec![[0.5, 0.0, 0.0], [19.5, 0.0, 0.0]],
            CUBIC_20,
        )
        .unwrap();
        let records = vec![StructureRecord::Frame(frame)];

        let stats = compute_stats_with(&records, &distinct_pairs()).unwrap();
        let min = stats.min_distance.unwrap();
        assert!((min - 1.0).abs() < 1e-9, "expected 1.0, got {min}");
    }

    #[test]
    fn merge_agrees_with_single_pass() {
        let records = vec![water(), dioxygen(), water()];
        let options = distinct_pairs();

        let whole = compute_stats_with(&records, &options).unwrap();

        let (left, right) = records.split_at(1);
        let mut a = StatsAccumulator::new();
        for record in left {
            a.observe(record, &options).unwrap();
        }
        let mut b = StatsAccumulator::new();
        for record in right {
            b.observe(record, &options).unwrap();
        }

        assert_eq!(a.clone().merge(b.clone()).finish(), whole);
        // Commutes as well.
        assert_eq!(b.merge(a).finish(), whole);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let options = StatsOptions::default();
        let mut a = StatsAccumulator::new();
        a.observe(&water(), &options).unwrap();
        let expected = a.clone().finish();

        assert_eq!(a.merge(StatsAccumulator::new()).finish(), expected);
    }

    #[test]
    fn unsupported_value_fails_with_its_index() {
        let good = json!({
            "kind": "atoms",
            "symbols": ["H"],
            "positions": [[0.0, 0.0, 0.0]],
        });
        let bad = json!({"kind": "wavefunction", "coefficients": []});
        let values = vec![good.clone(), good.clone(), bad, good.clone(), good];

        let err = compute_stats_from_values(&values, &StatsOptions::default()).unwrap_err();
        match err {
            StatsError::UnsupportedRecord { index, .. } => assert_eq!(index, 2),
            other => panic!("expected UnsupportedRecord, got {other:?}"),
        }
    }

    #[test]
    fn values_input_aggregates_like_typed_input() {
        let values = vec![
            json!({
                "kind": "atoms",
                "symbols": ["O", "H", "H"],
                "positions": [[0.0, 0.0, 0.0], [0.96, 0.0, 0.0], [-0.32, 1.02, 0.0]],
            }),
            json!({
                "kind": "system",
                "numbers": [8, 8],
                "symbols": ["O", "O"],
                "positions": [[0.0, 0.0, 0.0], [1.2, 0.0, 0.0]],
                "cell": [[20.0, 0.0, 0.0], [0.0, 20.0, 0.0], [0.0, 0.0, 20.0]],
            }),
        ];

        let stats = compute_stats_from_values(&values, &distinct_pairs()).unwrap();
        assert_eq!(stats.n_atoms_max, 3);
        assert_eq!(stats.atomic_numbers, vec![1, 8]);
        let min = stats.min_distance.unwrap();
        assert!((min - 0.96).abs() < 1e-12);
    }

    #[test]
    fn distance_failure_names_the_record() {
        let degenerate = Frame::new(
            vec![1, 1],
            vec!["H".to_string(), "H".to_string()],
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        )
        .unwrap();
        let records = vec![water(), StructureRecord::Frame(degenerate)];

        let err = compute_stats(&records).unwrap_err();
        match err {
            StatsError::DistanceComputation { index, .. } => assert_eq!(index, 1),
            other => panic!("expected DistanceComputation, got {other:?}"),
        }
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn consumes_a_lazy_single_pass_iterator() {
        let records = vec![water(), dioxygen()];
        // A bare iterator, not a re-iterable collection.
        let lazy = records.iter().filter(|r| r.atom_count() > 0);
        let stats = compute_stats(lazy).unwrap();
        assert_eq!(stats.n_atoms_max, 3);
    }

    #[test]
    fn stats_serialize_to_json() {
        let records = vec![water()];
        let stats = compute_stats_with(&records, &distinct_pairs()).unwrap();
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["n_atoms_max"], 3);
        assert_eq!(value["atomic_numbers"], json!([1, 8]));
        assert_eq!(value["element_symbols"], json!(["H", "O"]));

        let empty = compute_stats(&Vec::new()).unwrap();
        let value = serde_json::to_value(&empty).unwrap();
        assert_eq!(value["min_distance"], json!(null));
    }
}
