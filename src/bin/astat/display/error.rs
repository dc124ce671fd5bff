use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    collect_io_hints(err, &mut hints);
    collect_stats_hints(err, &mut hints);

    if hints.is_empty() {
        collect_fallback_hints(err, &mut hints);
    }

    if hints.is_empty() { None } else { Some(hints) }
}

fn collect_io_hints(err: &Error, hints: &mut Vec<String>) {
    use atom_stats::io::{Error as IoError, Format};

    let Some(io_err) = err.downcast_ref::<IoError>() else {
        return;
    };

    match io_err {
        IoError::Io { source } => collect_std_io_hints(source, hints),

        IoError::Parse { format, line, .. } => {
            hints.push(format!(
                "Parser encountered an issue near line {} in {} format",
                line, format
            ));
            hints.push("Inspect the file around that line for malformed entries".to_string());
            hints.push("Try specifying --infmt to ensure correct format detection".to_string());
            match format {
                Format::Xyz => {
                    hints.push("XYZ: each frame is an atom count, a comment, then 'symbol x y z' lines".to_string());
                    hints.push("XYZ: periodic frames carry Lattice=\"...\" with 9 components".to_string());
                }
                Format::Records => {
                    hints.push("Records: the file must be a JSON array of objects with a 'kind' field".to_string());
                }
            }
        }
    }
}

fn collect_std_io_hints(source: &std::io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::NotFound => {
            hints.push("File or directory not found".to_string());
            hints.push("Check the path spelling and ensure the file exists".to_string());
        }
        ErrorKind::PermissionDenied => {
            hints.push("Permission denied accessing the file".to_string());
            hints.push("Check file permissions with `ls -la`".to_string());
        }
        ErrorKind::InvalidData => {
            hints.push("File contains invalid or corrupt data".to_string());
            hints.push("Verify the file is not truncated or corrupted".to_string());
        }
        ErrorKind::UnexpectedEof => {
            hints.push("Unexpected end of file encountered".to_string());
            hints.push("The file may be truncated or incomplete".to_string());
        }
        _ => {
            hints.push("I/O operation failed".to_string());
            hints.push("Check file path, permissions, and disk space".to_string());
        }
    }
}

fn collect_stats_hints(err: &Error, hints: &mut Vec<String>) {
    use atom_stats::StatsError;

    let Some(stats_err) = err.downcast_ref::<StatsError>() else {
        return;
    };

    match stats_err {
        StatsError::UnsupportedRecord { index, .. } => {
            hints.push(format!("Record at index {} has an unrecognized shape", index));
            hints.push("Supported kinds: 'atoms' (symbols, positions, optional cell)".to_string());
            hints.push("and 'system' (numbers, symbols, positions, cell)".to_string());
        }
        StatsError::DistanceComputation { index, .. } => {
            hints.push(format!("Record at index {} has ill-defined geometry", index));
            hints.push("Check that its cell vectors span three dimensions".to_string());
        }
    }
}

fn collect_fallback_hints(err: &Error, hints: &mut Vec<String>) {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    let text = text.to_lowercase();

    if text.contains("terminal") || text.contains("stdin") {
        hints.push("Input appears to be from a terminal".to_string());
        hints.push("Provide input files or pipe data to stdin with --infmt".to_string());
    } else if text.contains("infer") || text.contains("infmt") {
        hints.push("Recognized extensions: .xyz, .extxyz, .json".to_string());
        hints.push("Use --infmt xyz or --infmt records to override".to_string());
    }
}
