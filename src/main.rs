//! CLI for docfill - fills labeled fields in Word documents.

use clap::{Parser, Subcommand};
use docfill::{convert, doc_to_docx, FieldTable, FormFiller};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a legacy .doc file to .docx
    Convert {
        /// Input .doc file path
        input: PathBuf,

        /// Output path (default: <stem>_converted.docx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill labeled fields in a .doc or .docx form
    Fill {
        /// Input document path (.doc input is converted first)
        input: PathBuf,

        /// Field value as KEY=VALUE (repeatable)
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// JSON file holding a {"key": "value"} data object
        #[arg(long, value_name = "FILE")]
        data_file: Option<PathBuf>,

        /// JSON file holding a [["Label", "key"], ...] alias table that
        /// replaces the built-in one
        #[arg(long, value_name = "FILE")]
        aliases: Option<PathBuf>,

        /// Output path (default: <stem>_filled.docx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let code = match args.command {
        Commands::Convert { input, output } => run_convert(&input, output),
        Commands::Fill {
            input,
            data,
            data_file,
            aliases,
            output,
        } => run_fill(&input, &data, data_file.as_deref(), aliases.as_deref(), output),
    };
    std::process::exit(code);
}

fn run_convert(input: &Path, output: Option<PathBuf>) -> i32 {
    match doc_to_docx(input) {
        Ok(converted) => match relocate(converted, output) {
            Ok(path) => {
                println!("Converted to {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error writing output: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error converting document: {}", e);
            1
        }
    }
}

fn run_fill(
    input: &Path,
    pairs: &[String],
    data_file: Option<&Path>,
    aliases: Option<&Path>,
    output: Option<PathBuf>,
) -> i32 {
    let data = match collect_data(pairs, data_file) {
        Ok(data) => data,
        Err(message) => {
            eprintln!("{}", message);
            return 2;
        }
    };
    if data.is_empty() {
        eprintln!("No data to fill; pass -d KEY=VALUE or --data-file");
        return 2;
    }

    let filler = match load_filler(aliases) {
        Ok(filler) => filler,
        Err(message) => {
            eprintln!("{}", message);
            return 2;
        }
    };

    // Legacy input goes through the converter chain first.
    let source = if convert::is_legacy_doc(input) {
        match doc_to_docx(input) {
            Ok(converted) => converted,
            Err(e) => {
                eprintln!("Error converting document: {}", e);
                return 1;
            }
        }
    } else {
        input.to_path_buf()
    };

    match filler.fill(&source, &data) {
        Ok((filled, count)) => match relocate(filled, output) {
            Ok(path) => {
                println!("Filled {} field(s) -> {}", count, path.display());
                0
            }
            Err(e) => {
                eprintln!("Error writing output: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error filling document: {}", e);
            1
        }
    }
}

/// Merges the data file (when given) with explicit KEY=VALUE pairs; explicit
/// pairs win on key collisions.
fn collect_data(
    pairs: &[String],
    data_file: Option<&Path>,
) -> Result<HashMap<String, String>, String> {
    let mut data = HashMap::new();
    if let Some(path) = data_file {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let parsed: HashMap<String, String> = serde_json::from_str(&contents)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
        data.extend(parsed);
    }
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                data.insert(key.to_string(), value.to_string());
            }
            _ => return Err(format!("Invalid data pair {:?}, expected KEY=VALUE", pair)),
        }
    }
    Ok(data)
}

fn load_filler(aliases: Option<&Path>) -> Result<FormFiller, String> {
    let path = match aliases {
        Some(path) => path,
        None => return Ok(FormFiller::with_defaults()),
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let table_pairs: Vec<(String, String)> = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
    let table = FieldTable::from_pairs(table_pairs).map_err(|e| e.to_string())?;
    log::debug!("loaded {} alias(es) from {}", table.len(), path.display());
    Ok(FormFiller::new(table))
}

/// Moves the produced file to the requested output path, when one was given.
fn relocate(produced: PathBuf, wanted: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match wanted {
        Some(wanted) if wanted != produced => {
            // rename does not cross filesystems; fall back to copy + remove.
            if std::fs::rename(&produced, &wanted).is_err() {
                std::fs::copy(&produced, &wanted)?;
                std::fs::remove_file(&produced)?;
            }
            Ok(wanted)
        }
        _ => Ok(produced),
    }
}
