//! blockhuff CLI: file I/O, verbose tracing, and size/ratio reporting around
//! the blockhuff-core engine.

mod config;
mod input_gen;

use blockhuff_core::{decode, encode};
use config::{Config, Mode};
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("try: blockhuff --help");
            std::process::exit(1);
        }
    };

    if let Err(error) = run(&config) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> blockhuff_core::Result<()> {
    if let Some(size) = config.generate_bytes {
        input_gen::write_sample_file(&config.input_file, config.seed, size)?;
        if config.verbose {
            println!(
                "generated {size}-byte sample input at {} (seed {})",
                config.input_file.display(),
                config.seed
            );
        }
    }

    match config.mode {
        Mode::Encode => run_encode(config),
        Mode::Decode => run_decode(config),
    }
}

fn run_encode(config: &Config) -> blockhuff_core::Result<()> {
    let input = fs::read(&config.input_file)?;
    let outcome = encode(&input, config.block_size)?;

    fs::write(&config.output_file, &outcome.payload)?;
    fs::write(&config.table_file, &outcome.table_text)?;

    if config.verbose {
        println!("codeword table:");
        print!("{}", outcome.table_text);
        println!();
        println!(
            "{} bytes -> {} symbols ({} distinct), {} bits packed, correction {}",
            outcome.stats.input_bytes,
            outcome.stats.symbol_count,
            outcome.stats.distinct_symbols,
            outcome.stats.payload_bits,
            outcome.stats.correction,
        );
    }

    print_statistics(input.len() as u64, outcome.payload.len() as u64, Mode::Encode);
    Ok(())
}

fn run_decode(config: &Config) -> blockhuff_core::Result<()> {
    let payload = fs::read(&config.input_file)?;
    let table_text = fs::read_to_string(&config.table_file)?;

    let outcome = decode(&payload, &table_text)?;
    fs::write(&config.output_file, &outcome.bytes)?;

    if outcome.stats.trailing_bits_dropped > 0 {
        eprintln!(
            "warning: {} trailing bit(s) matched no codeword and were dropped",
            outcome.stats.trailing_bits_dropped
        );
    }
    if config.verbose {
        println!(
            "{} payload bits -> {} bytes decoded",
            outcome.stats.payload_bits, outcome.stats.decoded_bytes,
        );
    }

    print_statistics(payload.len() as u64, outcome.bytes.len() as u64, Mode::Decode);
    Ok(())
}

/// Report file sizes and the compression ratio. Pure post-processing over
/// artifact byte lengths; the engine itself never prints.
fn print_statistics(input_bytes: u64, output_bytes: u64, mode: Mode) {
    println!("input size:  {input_bytes} bytes");
    println!("output size: {output_bytes} bytes");

    let (raw, packed) = match mode {
        Mode::Encode => (input_bytes, output_bytes),
        Mode::Decode => (output_bytes, input_bytes),
    };
    if raw > 0 {
        let ratio = (1.0 - packed as f64 / raw as f64) * 100.0;
        println!("compression ratio: {ratio:.2}%");
    }
}
