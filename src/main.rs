use clap::{Parser, ValueEnum};
use colored::*;
use std::collections::HashMap;
use std::path::PathBuf;

use ota_export::{default_header_path, export_password, ExtractError, OTA_PASSWORD_KEY};

#[derive(Parser)]
#[command(name = "ota-export")]
#[command(about = "Export the OTA password from a credentials header", long_about = None)]
struct Cli {
    /// Credentials header to scan (defaults to include/credentials.h)
    header: Option<PathBuf>,

    /// How to render the exported variable
    #[arg(short, long, value_enum, default_value = "shell")]
    format: Format,

    /// Only print the export line (for eval/command substitution)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// export OTA_PASSWORD='...'
    Shell,
    /// cargo:rustc-env=OTA_PASSWORD=...
    Cargo,
}

fn main() {
    let cli = Cli::parse();
    let header = cli.header.unwrap_or_else(default_header_path);

    if !cli.quiet {
        println!("Finding and exporting OTA password...");
    }

    let mut env = HashMap::new();
    let matches = match export_password(&header, &mut env) {
        Ok(matches) => matches,
        Err(ExtractError::Io { path, source }) => {
            eprintln!("{} Cannot read {}: {}", "❌".red(), path.display(), source);
            std::process::exit(1);
        }
        Err(err @ ExtractError::MacroNotFound { .. }) => {
            eprintln!("{} {}", "❌".red(), err);
            eprintln!("   Copy include/credentials-template.h to include/credentials.h and set OTA_PASSWORD");
            std::process::exit(1);
        }
    };

    if !cli.quiet {
        for m in &matches {
            println!("Found OTA_PASSWORD on line {}: {}", m.line, m.value);
        }
    }

    // export_password guarantees the key is present on success
    let password = &env[OTA_PASSWORD_KEY];
    match cli.format {
        Format::Shell => println!("export {}='{}'", OTA_PASSWORD_KEY, password),
        Format::Cargo => println!("cargo:rustc-env={}={}", OTA_PASSWORD_KEY, password),
    }
}
