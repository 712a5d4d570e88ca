//! Command-line configuration for the huffsteg tool.
//!
//! Hand-rolled parsing: a subcommand followed by `--flag value` pairs.
//! The demo subcommand works with zero arguments, using a time-based seed
//! that is printed so runs are reproducible with `--seed`.

use std::path::{Path, PathBuf};

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Encode(EncodeArgs),
    Decode(DecodeArgs),
    Demo(DemoArgs),
}

/// Arguments for `huffsteg encode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeArgs {
    /// Cover BMP image
    pub carrier: PathBuf,

    /// File to hide
    pub secret: PathBuf,

    /// Output stego image
    pub out: PathBuf,
}

/// Arguments for `huffsteg decode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeArgs {
    /// Stego BMP image containing hidden data
    pub stego: PathBuf,

    /// Output file for the extracted secret
    pub out: PathBuf,
}

/// Arguments for `huffsteg demo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    /// Seed for the generated carrier and sample secret
    pub seed: u64,

    /// Sample secret size in bytes
    pub size: usize,
}

/// Parse command-line arguments (without the program name).
///
/// Returns a human-readable error string for the caller to print.
pub fn parse(args: &[String]) -> Result<Command, String> {
    let Some(subcommand) = args.first() else {
        print_help();
        std::process::exit(0);
    };

    match subcommand.as_str() {
        "encode" => parse_encode(&args[1..]),
        "decode" => parse_decode(&args[1..]),
        "demo" => parse_demo(&args[1..]),
        "--help" | "-h" | "help" => {
            print_help();
            std::process::exit(0);
        }
        other => Err(format!("unknown subcommand: {other}")),
    }
}

fn parse_encode(args: &[String]) -> Result<Command, String> {
    let mut carrier: Option<PathBuf> = None;
    let mut secret: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--carrier" => carrier = Some(path_value(args, &mut i, "--carrier")?),
            "--secret" => secret = Some(path_value(args, &mut i, "--secret")?),
            "--out" => out = Some(path_value(args, &mut i, "--out")?),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(Command::Encode(EncodeArgs {
        carrier: carrier.ok_or("encode requires --carrier <BMP>")?,
        secret: secret.ok_or("encode requires --secret <FILE>")?,
        out: out.ok_or("encode requires --out <BMP>")?,
    }))
}

fn parse_decode(args: &[String]) -> Result<Command, String> {
    let mut stego: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--stego" => stego = Some(path_value(args, &mut i, "--stego")?),
            "--out" => out = Some(path_value(args, &mut i, "--out")?),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(Command::Decode(DecodeArgs {
        stego: stego.ok_or("decode requires --stego <BMP>")?,
        out: out.ok_or("decode requires --out <FILE>")?,
    }))
}

fn parse_demo(args: &[String]) -> Result<Command, String> {
    let mut seed: Option<u64> = None;
    let mut size: Option<usize> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                let raw = string_value(args, &mut i, "--seed")?;
                seed = Some(raw.parse().map_err(|_| "invalid seed")?);
            }
            "--size" => {
                let raw = string_value(args, &mut i, "--size")?;
                size = Some(raw.parse().map_err(|_| "invalid size")?);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    // Time-based default seed, printed later so the run is reproducible.
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|t| t.as_millis() as u64)
            .unwrap_or(0)
    });

    Ok(Command::Demo(DemoArgs {
        seed,
        size: size.unwrap_or(4096),
    }))
}

fn string_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn path_value(args: &[String], i: &mut usize, flag: &str) -> Result<PathBuf, String> {
    string_value(args, i, flag).map(PathBuf::from)
}

/// Warn (but proceed) when a carrier path doesn't look like a BMP.
///
/// The core never validates image structure, so this is purely a
/// user-facing nudge carried over from the original tool.
pub fn warn_if_not_bmp(path: &Path) {
    let is_bmp = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"));
    if !is_bmp {
        println!(
            "Warning: {} does not end with .bmp. Proceeding anyway.",
            path.display()
        );
    }
}

fn print_help() {
    println!("huffsteg: hide any file inside a BMP image");
    println!();
    println!("USAGE:");
    println!("    huffsteg <SUBCOMMAND> [OPTIONS]");
    println!();
    println!("SUBCOMMANDS:");
    println!("    encode      Compress a secret file and hide it in a carrier image");
    println!("    decode      Extract a hidden file from a stego image");
    println!("    demo        Generate a carrier and sample secret, run a round trip");
    println!();
    println!("ENCODE OPTIONS:");
    println!("    --carrier <BMP>         Cover image to hide data in");
    println!("    --secret <FILE>         File to hide (any content, including empty)");
    println!("    --out <BMP>             Output stego image");
    println!();
    println!("DECODE OPTIONS:");
    println!("    --stego <BMP>           Stego image containing hidden data");
    println!("    --out <FILE>            Output file for the extracted secret");
    println!();
    println!("DEMO OPTIONS:");
    println!("    --seed <N>              Seed for deterministic generation (default: time-based)");
    println!("    --size <N>              Sample secret size in bytes (default: 4096)");
    println!();
    println!("EXAMPLES:");
    println!("    huffsteg encode --carrier photo.bmp --secret notes.txt --out hidden.bmp");
    println!("    huffsteg decode --stego hidden.bmp --out notes.txt");
    println!("    huffsteg demo --seed 42");
    println!();
}
