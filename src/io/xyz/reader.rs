use std::io::BufRead;
use std::str::FromStr;

use crate::io::{Format, error::Error};
use crate::model::{atom::Atom, record::StructureRecord, structure::Structure, types::Element};

/// Reads a multi-frame (extended) XYZ stream.
///
/// Each frame is an atom-count line, a comment line that may carry
/// `Lattice="ax ay az bx by bz cx cy cz"`, and one `symbol x y z` line per
/// atom. Frames with a lattice become periodic structures.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<StructureRecord>, Error> {
    let lines = collect_lines(reader)?;

    let mut records = Vec::new();
    let mut cursor = 0usize;
    while let Some((count_no, count_line)) = next_data_line(&lines, &mut cursor) {
        let count: usize = count_line.trim().parse().map_err(|_| {
            Error::parse(Format::Xyz, count_no, "expected an atom count line")
        })?;

        let (comment_no, comment) = lines
            .get(cursor)
            .cloned()
            .ok_or_else(|| Error::parse(Format::Xyz, count_no, "missing comment line"))?;
        cursor += 1;

        let box_vectors = parse_lattice(&comment, comment_no)?;

        let mut atoms = Vec::with_capacity(count);
        for _ in 0..count {
            let (line_no, content) = lines.get(cursor).ok_or_else(|| {
                Error::parse(
                    Format::Xyz,
                    last_line_no(&lines),
                    format!("frame truncated: expected {count} atom lines"),
                )
            })?;
            cursor += 1;
            atoms.push(parse_atom_line(content, *line_no)?);
        }

        records.push(StructureRecord::Structure(Structure { atoms, box_vectors }));
    }

    Ok(records)
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(|e| Error::Io { source: e }))
        .collect()
}

/// Advances past blank lines and yields the next non-blank line.
fn next_data_line(lines: &[(usize, String)], cursor: &mut usize) -> Option<(usize, String)> {
    while *cursor < lines.len() {
        let (line_no, content) = &lines[*cursor];
        *cursor += 1;
        if content.trim().is_empty() {
            continue;
        }
        return Some((*line_no, content.clone()));
    }
    None
}

fn last_line_no(lines: &[(usize, String)]) -> usize {
    lines.last().map(|(n, _)| *n).unwrap_or(0)
}

/// Extracts box vectors from a `Lattice="..."` key in the comment line.
fn parse_lattice(comment: &str, line_no: usize) -> Result<Option<[[f64; 3]; 3]>, Error> {
    const KEY: &str = "Lattice=\"";

    let Some(start) = comment.find(KEY) else {
        return Ok(None);
    };
    let rest = &comment[start + KEY.len()..];
    let end = rest.find('"').ok_or_else(|| {
        Error::parse(Format::Xyz, line_no, "unterminated Lattice value")
    })?;

    let components: Vec<f64> = rest[..end]
        .split_whitespace()
        .map(|tok| tok.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| Error::parse(Format::Xyz, line_no, "non-numeric Lattice component"))?;

    if components.len() != 9 {
        return Err(Error::parse(
            Format::Xyz,
            line_no,
            format!("Lattice must have 9 components, found {}", components.len()),
        ));
    }

    Ok(Some([
        [components[0], components[1], components[2]],
        [components[3], components[4], components[5]],
        [components[6], components[7], components[8]],
    ]))
}

fn parse_atom_line(content: &str, line_no: usize) -> Result<Atom, Error> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(Error::parse(
            Format::Xyz,
            line_no,
            "atom line must be 'symbol x y z'",
        ));
    }

    let element = Element::from_str(parts[0])
        .map_err(|e| Error::parse(Format::Xyz, line_no, e.to_string()))?;

    let mut coords = [0.0; 3];
    for (slot, tok) in coords.iter_mut().zip(&parts[1..4]) {
        *slot = tok
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Xyz, line_no, format!("invalid coordinate '{tok}'")))?;
    }

    Ok(Atom::new(element, coords))
}
