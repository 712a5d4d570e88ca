//! huffsteg: hide any file inside a BMP image.
//!
//! Thin CLI over `huffsteg-core`: reads whole files, runs one blocking
//! encode or decode, writes whole files. Output files are written in a
//! single operation only after the core has succeeded, so a failed run
//! never leaves a partial or corrupt output behind.

mod carrier_gen;
mod config;

use config::{Command, DecodeArgs, DemoArgs, EncodeArgs};
use huffsteg_core::huffman::{FrequencyTable, HuffmanTree};
use huffsteg_core::{carrier, Result};
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match config::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run `huffsteg --help` for usage");
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Encode(args) => run_encode(&args),
        Command::Decode(args) => run_decode(&args),
        Command::Demo(args) => run_demo(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_encode(args: &EncodeArgs) -> Result<()> {
    config::warn_if_not_bmp(&args.carrier);
    config::warn_if_not_bmp(&args.out);

    let cover = fs::read(&args.carrier)?;
    let secret = fs::read(&args.secret)?;
    let checksum = crc32fast::hash(&secret);

    println!(
        "Embedding {} bytes from {} into {} ...",
        secret.len(),
        args.secret.display(),
        args.carrier.display()
    );

    let (stego, stats) = carrier::embed(&cover, &secret)?;
    fs::write(&args.out, &stego)?;

    stats.print_summary();
    println!("Secret CRC32: {checksum:#010x}");
    println!("Wrote {} ({} bytes)", args.out.display(), stego.len());
    Ok(())
}

fn run_decode(args: &DecodeArgs) -> Result<()> {
    config::warn_if_not_bmp(&args.stego);

    let stego = fs::read(&args.stego)?;

    println!("Extracting hidden file from {} ...", args.stego.display());
    let secret = carrier::extract(&stego)?;
    fs::write(&args.out, &secret)?;

    println!(
        "Extracted {} bytes to {}",
        secret.len(),
        args.out.display()
    );
    println!("Extracted CRC32: {:#010x}", crc32fast::hash(&secret));
    Ok(())
}

fn run_demo(args: &DemoArgs) -> Result<()> {
    println!("Seed: {}", args.seed);

    let secret = carrier_gen::generate_sample_secret(args.seed, args.size);

    // Size the carrier from the real frame, with some slack so the demo
    // shows partial utilization.
    let freq = FrequencyTable::from_bytes(&secret);
    let table = HuffmanTree::from_frequencies(&freq).code_table()?;
    let frame_bits = carrier::required_bits(table.payload_bit_count(&freq)?);
    let cover = carrier_gen::generate_bmp_carrier(args.seed.wrapping_add(1), frame_bits + 2048);

    println!(
        "Generated {}-byte sample secret and {}-byte carrier",
        secret.len(),
        cover.len()
    );

    let (stego, stats) = carrier::embed(&cover, &secret)?;
    let extracted = carrier::extract(&stego)?;

    stats.print_summary();

    let sent = crc32fast::hash(&secret);
    let received = crc32fast::hash(&extracted);
    println!("CRC32: secret {sent:#010x}, extracted {received:#010x}");

    if extracted != secret {
        return Err(std::io::Error::other("demo round trip mismatch").into());
    }
    println!("Round trip: PASSED");
    Ok(())
}
