use std::io::{self, Write};
use std::str::FromStr;

use atom_stats::{Element, SystemStats};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_stats_summary(stats: &SystemStats, n_records: usize) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let min_distance = match stats.min_distance {
        Some(d) => format!("{:.4} Å", d),
        None => "n/a (no records)".to_string(),
    };

    let rows = vec![
        ("Records", format!("{}", n_records)),
        ("Max Atoms", format!("{}", stats.n_atoms_max)),
        ("Distinct Elements", format!("{}", stats.element_symbols.len())),
        ("Min Distance", min_distance),
    ];

    print_kv_table(&mut out, "Collection Summary", &rows);
}

pub fn print_element_panel(stats: &SystemStats) {
    if stats.element_symbols.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let symbol_w = 10usize;
    let z_w = 8usize;

    let _ = writeln!(out, "{}┌─ Elements Present ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{s_line}┬{z_line}┐",
        INDENT,
        s_line = "─".repeat(symbol_w + 2),
        z_line = "─".repeat(z_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<symbol_w$} │ {:>z_w$} │",
        INDENT, "Symbol", "Z",
    );
    let _ = writeln!(
        out,
        "{}├{s_line}┼{z_line}┤",
        INDENT,
        s_line = "─".repeat(symbol_w + 2),
        z_line = "─".repeat(z_w + 2)
    );

    for symbol in &stats.element_symbols {
        let z = match Element::from_str(symbol) {
            Ok(element) => format!("{}", element.atomic_number()),
            Err(_) => "?".to_string(),
        };
        let _ = writeln!(
            out,
            "{}│ {:<symbol_w$} │ {:>z_w$} │",
            INDENT,
            truncate(symbol, symbol_w),
            z,
        );
    }

    let _ = writeln!(
        out,
        "{}└{s_line}┴{z_line}┘",
        INDENT,
        s_line = "─".repeat(symbol_w + 2),
        z_line = "─".repeat(z_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 18usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:<val_w$} │",
            INDENT,
            key,
            truncate(value, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
