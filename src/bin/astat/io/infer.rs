use std::path::Path;

use atom_stats::io::Format;

pub fn input_format(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "xyz" | "extxyz" => Some(Format::Xyz),
        "json" => Some(Format::Records),
        _ => None,
    }
}
