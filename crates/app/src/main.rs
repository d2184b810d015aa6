//! huffpack: encode a file or a built-in sample and report the result.
//!
//! Flow: load input -> encode -> print code table and packed bytes ->
//! decode and compare -> optionally write the framed output.

mod config;
mod input_gen;
mod report;

use config::{Config, Sample};
use huffpack_core::{framing::serialize_frame, Encoder};
use report::RunSummary;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the round trip reproduced the input.
fn run(config: &Config) -> huffpack_core::Result<bool> {
    if config.print_config {
        config.print();
    }

    let input = load_input(config)?;
    log::info!("loaded {} input bytes", input.len());

    let encoder = Encoder::new(config.encoder)?;
    let start = Instant::now();
    let encoded = encoder.encode(&input)?;
    let encode_time = start.elapsed();

    if config.print_table {
        report::print_code_table(&encoded);
    }
    report::print_packed(encoded.packed());

    let round_trip_ok = match encoded.decode() {
        Ok(decoded) => decoded == input,
        Err(e) => {
            log::error!("decode failed: {e}");
            false
        }
    };

    let frame_bytes = match &config.output_file {
        Some(path) => {
            let frame = serialize_frame(&encoded)?;
            std::fs::write(path, &frame)?;
            log::info!("wrote {} frame bytes to {}", frame.len(), path.display());
            Some(frame.len())
        }
        None => None,
    };

    report::print_summary(&RunSummary {
        input_bytes: input.len(),
        distinct_symbols: encoded.codes().len(),
        packed_bytes: encoded.packed().bytes().len(),
        frame_bytes,
        encode_time,
        round_trip_ok,
    });

    Ok(round_trip_ok)
}

fn load_input(config: &Config) -> std::io::Result<Vec<u8>> {
    if let Some(path) = &config.input_file {
        return std::fs::read(path);
    }

    Ok(match config.sample {
        Sample::Abracadabra => input_gen::ABRACADABRA.to_vec(),
        Sample::Alphabet => input_gen::alphabet_cycle(config.sample_size),
        Sample::Random => input_gen::generate_sample_data(
            config.seed,
            config.sample_size,
            config.encoder.alphabet_size,
        ),
    })
}
