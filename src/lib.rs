//! Aggregate statistics for collections of atomic structures.
//!
//! Scans a sequence of atomic-structure records and folds them into a single
//! summary: the maximum atom count, the sets of distinct atomic numbers and
//! chemical symbols, and the minimum pairwise interatomic distance under the
//! minimum-image convention for periodic records.
//!
//! # Record shapes
//!
//! Two record shapes are accepted, both behind the closed
//! [`StructureRecord`] enum:
//!
//! - [`Structure`] - typed [`Atom`]s ([`Element`] plus Cartesian position)
//!   with optional box vectors; distances honor the minimum-image convention
//!   when box vectors are present.
//! - [`Frame`] - flat atomic-number/symbol/position sequences with a
//!   mandatory periodic cell; distances are always minimum-image.
//!
//! Untyped data enters through [`StructureRecord::from_value`] or
//! [`compute_stats_from_values`]; a value matching neither shape fails the
//! call with the offending index.
//!
//! # Quick Start
//!
//! ```
//! use atom_stats::{Atom, Element, Structure, StructureRecord, compute_stats};
//!
//! let water = Structure::from_atoms(vec![
//!     Atom::new(Element::O, [0.000, 0.000, 0.000]),
//!     Atom::new(Element::H, [0.960, 0.000, 0.000]),
//!     Atom::new(Element::H, [-0.320, 1.020, 0.000]),
//! ]);
//!
//! let records = vec![StructureRecord::from(water)];
//! let stats = compute_stats(&records)?;
//!
//! assert_eq!(stats.n_atoms_max, 3);
//! assert_eq!(stats.atomic_numbers, vec![1, 8]);
//! assert_eq!(stats.element_symbols, vec!["H".to_string(), "O".to_string()]);
//!
//! // Self-distances participate by default, so any non-empty record
//! // drives the minimum to zero. See `MinDistanceConvention` for the
//! // strict pairwise alternative.
//! assert_eq!(stats.min_distance, Some(0.0));
//! # Ok::<(), atom_stats::StatsError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] - File readers (multi-frame XYZ, JSON records)
//! - [`compute_stats`] / [`compute_stats_with`] / [`compute_stats_from_values`] -
//!   the aggregation entry points
//! - [`StatsAccumulator`] - the underlying fold, exposed so partial
//!   aggregates can be merged (the reduction is associative and commutative)

mod model;
mod stats;

pub mod io;

pub use model::atom::Atom;
pub use model::frame::{Frame, FrameLengthError};
pub use model::geometry::{DistanceMatrix, GeometryError};
pub use model::record::{RecordError, StructureRecord};
pub use model::structure::Structure;
pub use model::types::{Element, ParseElementError};

pub use stats::{
    MinDistanceConvention, StatsAccumulator, StatsError, StatsOptions, SystemStats, compute_stats,
    compute_stats_from_values, compute_stats_with,
};
