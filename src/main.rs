//! NHA Assembler - Main Entry Point
//!
//! Translates one `.nha` source file into a `.bin` file of 16-bit words.
//!
//! # Usage
//! ```bash
//! cargo run -- <input.nha> [output.bin] [--strict] [--keep-duplicates] [-v]
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nha_asm::{Assembler, AssemblerConfig, ErrorPolicy};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const SOURCE_EXTENSION: &str = "nha";
const OUTPUT_EXTENSION: &str = "bin";

#[derive(Parser, Debug)]
#[command(author, version, about = "Assembler for the NHA 16-bit teaching machine")]
struct Cli {
    /// Source program (must end in `.nha`)
    input: PathBuf,

    /// Output file; defaults to the input path with a `.bin` extension
    output: Option<PathBuf>,

    /// Stop at the first malformed instruction instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Emit repeated instructions every time they appear
    #[arg(long)]
    keep_duplicates: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> AssemblerConfig {
        let policy = if self.strict {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Skip
        };
        AssemblerConfig::default()
            .deduplicate(!self.keep_duplicates)
            .on_malformed(policy)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Determines the output file path
fn output_path(input: &Path, explicit_output: Option<&Path>) -> PathBuf {
    explicit_output.map_or_else(
        || input.with_extension(OUTPUT_EXTENSION),
        Path::to_path_buf,
    )
}

fn run(cli: &Cli) -> Result<()> {
    if !has_source_extension(&cli.input) {
        return Err(format!(
            "Unrecognized file type: {} (expected a .{SOURCE_EXTENSION} file)",
            cli.input.display()
        )
        .into());
    }

    let output = output_path(&cli.input, cli.output.as_deref());
    let assembler = Assembler::new(cli.config());
    let summary = assembler.assemble_file(&cli.input, &output)?;

    info!(
        emitted = summary.emitted,
        duplicates = summary.duplicates,
        dropped = summary.dropped,
        malformed = summary.malformed,
        "assembly finished"
    );
    println!("Assembly completed. Output written to {}", output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_generation() {
        assert_eq!(output_path(Path::new("test.nha"), None), PathBuf::from("test.bin"));
        assert_eq!(
            output_path(Path::new("dir/file.nha"), None),
            PathBuf::from("dir/file.bin")
        );
        assert_eq!(
            output_path(Path::new("path/to/file.nha"), None),
            PathBuf::from("path/to/file.bin")
        );
    }

    #[test]
    fn test_output_path_explicit() {
        assert_eq!(
            output_path(Path::new("any.nha"), Some(Path::new("out.bin"))),
            PathBuf::from("out.bin")
        );
    }

    #[test]
    fn test_source_extension() {
        assert!(has_source_extension(Path::new("Add.nha")));
        assert!(has_source_extension(Path::new("dir/Add.nha")));
        assert!(!has_source_extension(Path::new("Add.asm")));
        assert!(!has_source_extension(Path::new("nha")));
    }

    #[test]
    fn test_cli_flags_map_to_config() {
        let cli = Cli::parse_from(["nha-asm", "Add.nha", "--strict", "--keep-duplicates"]);
        let config = cli.config();
        assert_eq!(config.on_malformed, ErrorPolicy::Abort);
        assert!(!config.deduplicate);

        let cli = Cli::parse_from(["nha-asm", "Add.nha", "out.bin", "-vv"]);
        assert_eq!(cli.config(), AssemblerConfig::default());
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.bin")));
        assert_eq!(cli.verbose, 2);
    }
}
