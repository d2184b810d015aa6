//! Configuration for the huffpack application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool works with ZERO arguments: it encodes the `abracadabra`
//! sample over the ASCII alphabet. Random samples use an explicit or
//! clock-derived seed, which `--print-config` shows so runs can be repeated.

use huffpack_core::encoder::{EncoderConfig, ASCII_ALPHABET, DEFAULT_CHUNK_SIZE};
use huffpack_core::MAX_CODE_LEN;
use std::path::PathBuf;

/// Built-in inputs used when no file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The word "abracadabra"
    Abracadabra,
    /// `a..z` repeated up to the sample size
    Alphabet,
    /// Seeded mix of runs, text-like and random bytes
    Random,
}

impl Sample {
    fn parse(name: &str) -> Result<Self, String> {
        match name {
            "abracadabra" => Ok(Sample::Abracadabra),
            "alphabet" => Ok(Sample::Alphabet),
            "random" => Ok(Sample::Random),
            other => Err(format!("unknown sample: {other}")),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sample::Abracadabra => "abracadabra",
            Sample::Alphabet => "alphabet",
            Sample::Random => "random",
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Input file path (None = use a built-in sample)
    pub input_file: Option<PathBuf>,

    /// Which sample to generate without an input file
    pub sample: Sample,

    /// Length of generated samples in bytes
    pub sample_size: usize,

    /// Seed for the random sample
    pub seed: u64,

    // === Output ===
    /// Where to write the encoded frame (None = don't write)
    pub output_file: Option<PathBuf>,

    // === Encoder ===
    pub encoder: EncoderConfig,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the per-symbol code table
    pub print_table: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut sample = Sample::Abracadabra;
        let mut sample_size: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut alphabet_size = ASCII_ALPHABET;
        let mut end_of_stream: Option<u8> = None;
        let mut chunk_size = DEFAULT_CHUNK_SIZE;
        let mut max_code_len = MAX_CODE_LEN;
        let mut print_config = false;
        let mut print_table = true;

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--in" => input_file = Some(PathBuf::from(value(args, &mut i, flag)?)),
                "--out" => output_file = Some(PathBuf::from(value(args, &mut i, flag)?)),
                "--sample" => sample = Sample::parse(value(args, &mut i, flag)?)?,
                "--size" => sample_size = Some(number(args, &mut i, flag)?),
                "--seed" => seed = Some(number(args, &mut i, flag)?),
                "--alphabet" => alphabet_size = number(args, &mut i, flag)?,
                "--eos" => end_of_stream = Some(number(args, &mut i, flag)?),
                "--chunk-size" => chunk_size = number(args, &mut i, flag)?,
                "--max-code-len" => max_code_len = number(args, &mut i, flag)?,
                "--print-config" => print_config = true,
                "--no-table" => print_table = false,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => return Err(format!("unknown argument: {flag}")),
            }
            i += 1;
        }

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut encoder = EncoderConfig::new(alphabet_size)
            .with_chunk_size(chunk_size)
            .with_max_code_len(max_code_len);
        encoder.end_of_stream = end_of_stream;
        encoder.validate().map_err(|e| e.to_string())?;

        Ok(Config {
            input_file,
            sample,
            sample_size: sample_size.unwrap_or(8000),
            seed,
            output_file,
            encoder,
            print_config,
            print_table,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!("Input:       sample '{}'", self.sample.name()),
        }
        if self.input_file.is_none() && self.sample != Sample::Abracadabra {
            println!("Sample size: {} bytes", self.sample_size);
            println!("Seed:        {}", self.seed);
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        println!();
        println!("=== Encoder ===");
        println!("Alphabet size:   {}", self.encoder.alphabet_size);
        println!("Max code length: {} bits", self.encoder.max_code_len);
        println!("Count chunk:     {} bytes", self.encoder.chunk_size);
        match self.encoder.end_of_stream {
            Some(symbol) => println!("End of stream:   symbol {symbol}"),
            None => println!("End of stream:   (exact bit length only)"),
        }
        println!();
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, String> {
    let raw = value(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("invalid value for {flag}: {raw}"))
}

fn print_help() {
    println!("huffpack: Huffman code table and bit packing for a byte stream");
    println!();
    println!("USAGE:");
    println!("    huffpack [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (default: built-in sample)");
    println!("    --out <PATH>            Write the encoded frame to PATH");
    println!("    --sample <NAME>         abracadabra | alphabet | random (default: abracadabra)");
    println!("    --size <N>              Generated sample length (default: 8000)");
    println!("    --seed <N>              Random seed for the random sample");
    println!();
    println!("    --alphabet <N>          Alphabet size, 1-256 (default: 128)");
    println!("    --eos <SYMBOL>          Append end-of-stream symbol (e.g. 0)");
    println!("    --chunk-size <N>        Frequency counting slice (default: 1000)");
    println!("    --max-code-len <N>      Longest allowed code, 1-128 (default: 100)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-table              Don't print the code table");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack                                  # Encode \"abracadabra\"");
    println!("    huffpack --sample alphabet --eos 0        # 8000-byte a..z cycle with EOF");
    println!("    huffpack --in notes.txt --alphabet 256 --out notes.hufp");
    println!();
}
