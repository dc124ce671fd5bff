mod stats;

pub use stats::run_stats;
