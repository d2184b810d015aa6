//! Human-readable output for an encoding run.
//!
//! Prints the code table, the packed stream and a closing summary.

use huffpack_core::{Encoded, PackedStream};
use std::time::Duration;

/// Bytes shown before the packed dump is cut off.
const DUMP_LIMIT: usize = 64;

/// Print `symbol | code | frequency`, one row per coded symbol, ascending.
pub fn print_code_table(encoded: &Encoded) {
    let frequencies = encoded.frequencies();
    let width = encoded.codes().max_len().max(4);

    println!("=== Code Table ===");
    println!("{:<8} | {:<width$} | {}", "Symbol", "Code", "Frequency");
    println!("{}", "-".repeat(8 + 3 + width + 3 + 9));
    for (symbol, code) in encoded.codes().iter() {
        let label = if encoded.end_of_stream() == Some(symbol) {
            "EOF".to_string()
        } else {
            symbol_label(symbol)
        };
        println!("{:<8} | {:<width$} | {}", label, code.to_string(), frequencies.get(symbol));
    }
    println!();
}

/// Print the packed bits, bytes in hex and as escaped ASCII.
pub fn print_packed(packed: &PackedStream) {
    let bytes = packed.bytes();
    let shown = &bytes[..bytes.len().min(DUMP_LIMIT)];
    let elided = if shown.len() < bytes.len() { " ..." } else { "" };

    println!("=== Packed Stream ===");
    if bytes.len() <= DUMP_LIMIT {
        println!("Bits:    {}", packed.to_bit_string());
    }
    println!("Hex:     {}{}", hex_bytes(shown), elided);
    println!("ASCII:   {}{}", escape_bytes(shown), elided);
    println!(
        "Size:    {} bytes ({} bits + {} padding)",
        bytes.len(),
        packed.bit_len(),
        packed.padding_bits()
    );
    println!();
}

/// Figures collected over one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub input_bytes: usize,
    pub distinct_symbols: usize,
    pub packed_bytes: usize,
    pub frame_bytes: Option<usize>,
    pub encode_time: Duration,
    pub round_trip_ok: bool,
}

impl RunSummary {
    /// Packed size over input size, 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.packed_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Print input and packed sizes, timing and the round-trip verdict.
pub fn print_summary(summary: &RunSummary) {
    println!("=== Summary ===");
    println!(
        "Input:    {} bytes, {} distinct symbols",
        summary.input_bytes, summary.distinct_symbols
    );
    println!("Packed:   {} bytes", summary.packed_bytes);
    if let Some(frame) = summary.frame_bytes {
        println!("Frame:    {frame} bytes");
    }
    println!("Ratio:    {:.1}%", summary.ratio() * 100.0);
    println!("Encode:   {:.3} ms", summary.encode_time.as_secs_f64() * 1000.0);
    if summary.round_trip_ok {
        println!("Round trip: PASSED ✓");
    } else {
        println!("Round trip: FAILED ✗");
    }
    println!();
}

/// Printable ASCII as itself in quotes, anything else escaped.
pub fn symbol_label(symbol: u8) -> String {
    format!("'{}'", std::ascii::escape_default(symbol))
}

pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}
