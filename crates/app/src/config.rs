//! Configuration for the blockhuff CLI.
//!
//! Handles parsing and validating command-line arguments. All configuration
//! is an owned value handed to the run; nothing lives in process-wide state.

use std::path::PathBuf;

/// Which pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Encode or decode
    pub mode: Mode,

    /// Input file path (encoded payload when decoding)
    pub input_file: PathBuf,

    /// Output file path (payload when encoding, reconstructed bytes when
    /// decoding)
    pub output_file: PathBuf,

    /// Codeword-table artifact path (written on encode, read on decode)
    pub table_file: PathBuf,

    /// Symbol block size in bytes (encode only; decode reads it from the
    /// table artifact)
    pub block_size: usize,

    /// Print the codeword table and pipeline stats
    pub verbose: bool,

    /// Generate a sample input file of this many bytes before encoding
    pub generate_bytes: Option<usize>,

    /// Seed for sample generation (defaults to a time-based value)
    pub seed: u64,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// Exactly one of `--encode`/`--decode` is required, along with the
    /// three file paths. The block size is validated here, before any
    /// processing begins.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut encode = false;
        let mut decode = false;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut table_file: Option<PathBuf> = None;
        let mut block_size: usize = 1;
        let mut verbose = false;
        let mut generate_bytes: Option<usize> = None;
        let mut seed: Option<u64> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--encode" | "-e" => {
                    encode = true;
                }
                "--decode" | "-d" => {
                    decode = true;
                }
                "--in" | "-i" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" | "-o" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--table" | "-t" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--table requires a path".to_string());
                    }
                    table_file = Some(PathBuf::from(&args[i]));
                }
                "--block-size" | "-s" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--block-size requires a number".to_string());
                    }
                    block_size = args[i].parse().map_err(|_| "invalid block size")?;
                }
                "--gen" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--gen requires a byte count".to_string());
                    }
                    generate_bytes = Some(args[i].parse().map_err(|_| "invalid byte count")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let mode = match (encode, decode) {
            (true, false) => Mode::Encode,
            (false, true) => Mode::Decode,
            (true, true) => return Err("--encode and --decode are mutually exclusive".to_string()),
            (false, false) => return Err("one of --encode or --decode is required".to_string()),
        };

        if mode == Mode::Encode && block_size < 1 {
            return Err("block size must be at least 1".to_string());
        }
        if generate_bytes.is_some() && mode != Mode::Encode {
            return Err("--gen only makes sense with --encode".to_string());
        }

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            mode,
            input_file: input_file.ok_or("--in is required")?,
            output_file: output_file.ok_or("--out is required")?,
            table_file: table_file.ok_or("--table is required")?,
            block_size,
            verbose,
            generate_bytes,
            seed,
        })
    }
}

fn print_help() {
    println!("blockhuff: block-based Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    blockhuff (--encode | --decode) --in <PATH> --out <PATH> --table <PATH> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --encode, -e            Compress the input file");
    println!("    --decode, -d            Reconstruct from payload + table");
    println!("    --in, -i <PATH>         Input file (payload when decoding)");
    println!("    --out, -o <PATH>        Output file");
    println!("    --table, -t <PATH>      Codeword-table artifact");
    println!("    --block-size, -s <N>    Symbol size in bytes, encode only (default: 1)");
    println!("    --gen <N>               Generate an N-byte sample input before encoding");
    println!("    --seed <N>              Seed for --gen (default: time-based)");
    println!("    --verbose, -v           Print the codeword table and stats");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    blockhuff -e -i input.txt -o output.bin -t table.txt -s 3");
    println!("    blockhuff -d -i output.bin -o restored.txt -t table.txt -v");
    println!("    blockhuff -e --gen 65536 --seed 42 -i sample.bin -o out.bin -t table.txt");
    println!();
}
