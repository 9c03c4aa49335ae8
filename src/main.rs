use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use ascii_hamming::config::{Overrides, Settings};
use ascii_hamming::pipeline::{self, PlaneSetInfo};
use ascii_hamming::{logging, HammingError};

#[derive(Parser)]
#[command(name = "ascii-hamming", about = "Spread text across twelve Hamming-protected bit-plane files")]
struct Cli {
    /// Log to stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args)]
struct Common {
    /// TOML file with parity / prefix / max_input / max_plane_bytes
    #[arg(short, long, env = "ASCII_HAMMING_CONFIG")]
    config: Option<PathBuf>,
    /// Parity mode: even (default) or odd, case sensitive
    #[arg(short, long, env = "ASCII_HAMMING_PARITY")]
    parity: Option<String>,
    /// Plane files are named <PREFIX>_<0..11>.hamming (default "file")
    #[arg(short = 'e', long, env = "ASCII_HAMMING_PREFIX")]
    prefix: Option<String>,
    /// Largest accepted message in bytes (default 1024)
    #[arg(long, env = "ASCII_HAMMING_MAX_INPUT")]
    max_input: Option<usize>,
    /// Largest accepted plane file in bytes (default 4196)
    #[arg(long, env = "ASCII_HAMMING_MAX_PLANE_BYTES")]
    max_plane_bytes: Option<usize>,
}

impl From<Common> for Overrides {
    fn from(c: Common) -> Self {
        Overrides {
            config:          c.config,
            parity:          c.parity,
            prefix:          c.prefix,
            max_input:       c.max_input,
            max_plane_bytes: c.max_plane_bytes,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Read a message from stdin and write the twelve plane files
    Encode {
        #[command(flatten)]
        common: Common,
    },
    /// Read the twelve plane files, correct what can be corrected, print the message
    Decode {
        #[command(flatten)]
        common: Common,
    },
    /// Describe a plane file set without decoding it
    Info {
        #[command(flatten)]
        common: Common,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("logger unavailable: {e}");
    }
    match run(cli.command) {
        Ok(())   => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), HammingError> {
    match command {

        // ── Encode ───────────────────────────────────────────────────────────
        Commands::Encode { common } => {
            let settings = Settings::resolve(common.into())?;
            let summary = pipeline::encode_to_files(&settings, io::stdin().lock())?;
            log::info!("encoded {} chars into {}_{{0..11}}.hamming, {} B each ({} parity)",
                summary.chars, settings.prefix, summary.plane_bytes, settings.parity);
        }

        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode { common } => {
            let settings = Settings::resolve(common.into())?;
            let report = pipeline::decode_from_files(&settings)?;
            pipeline::write_report(io::stdout().lock(), &report)?;
            log::info!("decoded {} chars: {} corrected, {} flagged, {} padding slots",
                report.bytes.len(), report.corrected, report.flagged, report.padding);
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { common, json } => {
            let settings = Settings::resolve(common.into())?;
            let info = pipeline::inspect(&settings);
            if json {
                println!("{}", serde_json::to_string_pretty(&info).map_err(io::Error::from)?);
            } else {
                print_info(&info);
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn print_info(info: &PlaneSetInfo) {
    println!("── Plane set {} ─────────────────────────────────────", info.prefix);
    println!("{:>5}  {:<10} {:>7} {:>9}  {:<16}  Path", "Plane", "Role", "Bytes", "CRC32", "Head");
    for p in &info.planes {
        match &p.error {
            None => println!("{:>5}  {:<10} {:>7} {:>9}  {:<16}  {}",
                p.index, p.role,
                p.len.unwrap_or_default(),
                p.crc32.as_deref().unwrap_or("-"),
                p.preview.as_deref().unwrap_or("-"),
                p.path),
            Some(err) => println!("{:>5}  {:<10} {:>7} {:>9}  {:<16}  {} ({err})",
                p.index, p.role, "-", "-", "-", p.path),
        }
    }
    println!("  Uniform length  {}", info.uniform);
    match (info.message_len, info.padding) {
        (Some(len), Some(pad)) => println!("  Characters      {len} (+{pad} padding slots)"),
        _                      => println!("  Characters      unknown"),
    }
}
