use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use atom_stats::io::Format;

#[derive(Parser)]
#[command(
    name = "astat",
    about = "Aggregate statistics for atomic-structure collections",
    version,
    author,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// Input file(s) (stdin if omitted, requires --infmt)
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Input format (inferred from the file extension if omitted)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    /// Exclude self-distances (the zero diagonal) from the minimum distance
    #[arg(long = "pairs-only")]
    pub pairs_only: bool,

    /// Emit the aggregate statistics as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Multi-frame (extended) XYZ
    Xyz,
    /// JSON array of tagged records
    Records,
}

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Xyz => Format::Xyz,
            InputFormat::Records => Format::Records,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
