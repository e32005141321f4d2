//! Pointload CLI - Load monitoring point definitions from a spreadsheet
//!
//! # Main Commands
//!
//! ```bash
//! pointload load points.xlsx            # Validate and summarize every sheet
//! pointload load points.xlsx --json     # Full report as JSON
//! pointload sheets points.xlsx          # List sheets and row counts
//! pointload columns                     # Show the recognized header labels
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! pointload parse points.xlsx           # Dump raw sheet grids as JSON
//! ```
//!
//! The input path may also come from `POINTLOAD_FILE` (a `.env` file in the
//! working directory is loaded first). Logging honors `RUST_LOG`.

use clap::{Parser, Subcommand};
use pointload::config::DEFAULT_LOG_FILTER;
use pointload::logs::log_error;
use pointload::{
    load_points, open_workbook, render_sheets, render_summary, HeaderCollision,
    LoadOptions, SheetSource, FIELDS,
};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pointload")]
#[command(about = "Load monitoring point definitions from a spreadsheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map, validate and summarize every data row
    Load {
        /// Input workbook (.xlsx, .xls, .ods, .csv, ...)
        #[arg(env = "POINTLOAD_FILE")]
        input: PathBuf,

        /// Only process this sheet (repeatable)
        #[arg(short, long = "sheet")]
        sheets: Vec<String>,

        /// Use the left-most column when a header label repeats
        #[arg(long)]
        first_header_wins: bool,

        /// Reject rows whose point code or sampling frequency column is absent
        #[arg(long)]
        strict: bool,

        /// Print the full report as JSON instead of the summary
        #[arg(long)]
        json: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List sheets with their row counts
    Sheets {
        /// Input workbook
        #[arg(env = "POINTLOAD_FILE")]
        input: PathBuf,
    },

    /// Show the recognized column labels
    Columns,

    /// Dump raw sheet grids as JSON
    Parse {
        /// Input workbook
        #[arg(env = "POINTLOAD_FILE")]
        input: PathBuf,

        /// Only dump this sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Load {
            input,
            sheets,
            first_header_wins,
            strict,
            json,
            output,
        } => {
            let collision = if first_header_wins {
                HeaderCollision::FirstWins
            } else {
                HeaderCollision::LastWins
            };
            let options = LoadOptions::new(input)
                .with_sheets(sheets)
                .with_header_collision(collision)
                .with_required_key_fields(strict);
            cmd_load(&options, json, output.as_deref())
        }

        Commands::Sheets { input } => cmd_sheets(&input),

        Commands::Columns => cmd_columns(),

        Commands::Parse {
            input,
            sheet,
            output,
        } => cmd_parse(&input, sheet.as_deref(), output.as_deref()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_load(
    options: &LoadOptions,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_points(options)?;

    if json {
        let json = serde_json::to_string_pretty(&report)?;
        return write_output(&json, output);
    }

    // Each rejected row was already logged as it was processed.
    eprintln!("\n📊 Sheets:");
    eprint!("{}", render_sheets(&report));
    for missing in &report.missing_sheets {
        eprintln!("  {}: not in workbook", missing);
    }
    eprintln!();

    write_output(render_summary(&report).trim_end(), output)
}

fn cmd_sheets(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Workbook: {}", input.display());

    let mut workbook = open_workbook(input)?;
    for name in workbook.sheet_names() {
        match workbook.read_rows(&name) {
            Ok(rows) => println!("  {} ({} rows)", name, rows.len()),
            Err(e) => println!("  {} (unreadable: {})", name, e),
        }
    }
    Ok(())
}

fn cmd_columns() -> Result<(), Box<dyn std::error::Error>> {
    println!("Recognized columns ({}):\n", FIELDS.len());
    for spec in FIELDS.iter() {
        let marker = if spec.is_key() { "*" } else { " " };
        println!(
            "  {} {:<10} {:<22} {}",
            marker,
            spec.label,
            spec.name,
            spec.kind.describe()
        );
    }
    println!("\n* rows are dropped when this field fails to decode");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    sheet: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let mut workbook = open_workbook(input)?;
    let mut sheets = Map::new();
    for name in workbook.sheet_names() {
        if sheet.is_some_and(|wanted| wanted != name) {
            continue;
        }
        let rows = workbook.read_rows(&name)?;
        eprintln!("   {}: {} rows", name, rows.len());
        sheets.insert(name, serde_json::to_value(rows)?);
    }

    let json = serde_json::to_string_pretty(&Value::Object(sheets))?;
    write_output(&json, output)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
