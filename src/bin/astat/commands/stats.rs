use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};

use atom_stats::io::{self, Format};
use atom_stats::{
    MinDistanceConvention, StatsError, StatsOptions, StructureRecord, compute_stats_with,
};

use crate::cli::Cli;
use crate::display::{
    Context as DisplayContext, Progress, print_element_panel, print_stats_summary,
};
use crate::io::{infer_input_format, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 2;

pub fn run_stats(args: Cli, ctx: DisplayContext) -> Result<()> {
    if args.inputs.is_empty() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: astat <FILE>... or pipe data via stdin."
        );
    }

    let options = StatsOptions {
        min_distance: if args.pairs_only {
            MinDistanceConvention::DistinctPairs
        } else {
            MinDistanceConvention::WithSelfPairs
        },
    };

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structures");
    let (records, read_substeps) = read_all_records(&args)?;
    let read_substeps_ref: Vec<&str> = read_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading structures", &read_substeps_ref);

    progress.step("Computing statistics");
    let stats =
        compute_stats_with(&records, &options).context("Statistics aggregation failed")?;
    let scan_substep = format!("{} records scanned", records.len());
    progress.complete_step("Computing statistics", &[scan_substep.as_str()]);

    progress.finish();

    if ctx.interactive {
        print_stats_summary(&stats, records.len());
        print_element_panel(&stats);
    }

    if args.json {
        let json =
            serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
        println!("{json}");
    }

    Ok(())
}

fn read_all_records(args: &Cli) -> Result<(Vec<StructureRecord>, Vec<String>)> {
    let mut records = Vec::new();
    let mut substeps = Vec::new();

    if args.inputs.is_empty() {
        let format = match args.format {
            Some(f) => f.into(),
            None => bail!("Reading from stdin requires --infmt"),
        };
        let count = read_source(std::io::stdin().lock(), format, &mut records)
            .context("Failed to read from stdin")?;
        substeps.push(format!("stdin: {count} records ({format})"));
    } else {
        for path in &args.inputs {
            let format = match args.format {
                Some(f) => f.into(),
                None => infer_input_format(path).with_context(|| {
                    format!(
                        "Cannot infer the format of '{}' (use --infmt)",
                        path.display()
                    )
                })?,
            };
            let reader = open_input(path)?;
            let count = read_source(reader, format, &mut records)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            substeps.push(format!("{}: {count} records ({format})", file_label(path)));
        }
    }

    Ok((records, substeps))
}

/// Reads one input into `records`, returning how many records it contributed.
///
/// JSON record values are converted one at a time so an unrecognized shape
/// fails with its position in the overall record sequence.
fn read_source<R: BufRead>(
    reader: R,
    format: Format,
    records: &mut Vec<StructureRecord>,
) -> Result<usize> {
    match format {
        Format::Xyz => {
            let parsed = io::xyz::read(reader)?;
            let count = parsed.len();
            records.extend(parsed);
            Ok(count)
        }
        Format::Records => {
            let values = io::records::read(reader)?;
            let count = values.len();
            for value in &values {
                let index = records.len();
                let record = StructureRecord::from_value(value)
                    .map_err(|source| StatsError::UnsupportedRecord { index, source })?;
                records.push(record);
            }
            Ok(count)
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
