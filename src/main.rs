//! Calcgrid - a non-interactive spreadsheet evaluator.
//!
//! Loads a sheet file (JSON mapping addresses to raw content), applies any
//! edits given on the command line, and prints evaluated values.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use calcgrid_core::{CellRef, Document, NumberFormat};
use calcgrid_engine::engine::evaluate_input;

fn print_usage() {
    eprintln!("Usage: calcgrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to open (JSON)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <CONTENT>   Evaluate one piece of cell content and print it");
    eprintln!("  -g, --get <CELL>          Print the displayed value of a cell");
    eprintln!("      --set <CELL=CONTENT>  Set a cell before evaluating (can be repeated)");
    eprintln!("      --format <CELL=FMT>   Set a number format: general, currency,");
    eprintln!("                            percentage, or thousands (can be repeated)");
    eprintln!("  -o, --output <FILE>       Export displayed values as CSV");
    eprintln!("      --save <FILE>         Write the sheet back as JSON");
    eprintln!("  -h, --help                Print help");
}

#[derive(Default)]
struct Options {
    file: Option<PathBuf>,
    command: Option<String>,
    get: Option<String>,
    sets: Vec<String>,
    formats: Vec<String>,
    output: Option<PathBuf>,
    save: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires cell content");
                    std::process::exit(2);
                }
                opts.command = Some(args[i].clone());
            }
            "-g" | "--get" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --get requires a cell address");
                    std::process::exit(2);
                }
                opts.get = Some(args[i].clone());
            }
            "--set" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --set requires CELL=CONTENT");
                    std::process::exit(2);
                }
                opts.sets.push(args[i].clone());
            }
            "--format" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --format requires CELL=FORMAT");
                    std::process::exit(2);
                }
                opts.formats.push(args[i].clone());
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(2);
                }
                opts.output = Some(PathBuf::from(&args[i]));
            }
            "--save" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --save requires a file path");
                    std::process::exit(2);
                }
                opts.save = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(2);
            }
            _ => {
                if opts.file.is_none() {
                    opts.file = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(2);
                }
            }
        }
        i += 1;
    }

    match run(opts) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(opts: Options) -> Result<i32> {
    let mut doc = Document::with_file(opts.file.clone())
        .with_context(|| format!("failed to load {:?}", opts.file))?;

    for spec in &opts.sets {
        let (cell, content) = spec
            .split_once('=')
            .with_context(|| format!("--set expects CELL=CONTENT, got '{spec}'"))?;
        let addr = CellRef::parse(cell.trim())?;
        doc.set_cell(addr, content)?;
    }

    for spec in &opts.formats {
        let (cell, name) = spec
            .split_once('=')
            .with_context(|| format!("--format expects CELL=FORMAT, got '{spec}'"))?;
        let addr = CellRef::parse(cell.trim())?;
        let Some(format) = NumberFormat::parse(name) else {
            bail!("unknown number format '{name}'");
        };
        doc.set_format(addr, format)?;
    }

    let mut exit_code = 0;
    let mut printed = false;

    if let Some(content) = &opts.command {
        let value = evaluate_input(&doc.sheet, content);
        println!("{}", value);
        if value.is_error() {
            exit_code = 1;
        }
        printed = true;
    }

    if let Some(cell) = &opts.get {
        let addr = CellRef::parse(cell.trim())?;
        let value = doc.evaluate_cell(&addr);
        println!("{}", value);
        if value.is_error() {
            exit_code = 1;
        }
        printed = true;
    }

    if let Some(path) = &opts.output {
        doc.export_csv(path, None)
            .with_context(|| format!("failed to export {}", path.display()))?;
        printed = true;
    }

    if let Some(path) = &opts.save {
        doc.save_file_as(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        printed = true;
    }

    if !printed {
        print_grid(&doc);
    }

    Ok(exit_code)
}

/// Print the occupied bounding box as tab-separated rows.
fn print_grid(doc: &Document) {
    let occupied = doc.occupied();
    let Some(first) = occupied.first() else {
        return;
    };

    let (mut min_col, mut max_col) = (first.col, first.col);
    let (min_row, mut max_row) = (first.row, first.row);
    for addr in &occupied {
        min_col = min_col.min(addr.col);
        max_col = max_col.max(addr.col);
        max_row = max_row.max(addr.row);
    }

    for row in min_row..=max_row {
        let fields: Vec<String> = (min_col..=max_col)
            .map(|col| doc.display(&CellRef::new(col, row)))
            .collect();
        println!("{}", fields.join("\t"));
    }
}
