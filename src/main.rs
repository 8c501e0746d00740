//! # linepack CLI
//!
//! Converts every LINE transcript it is pointed at and prints one line per file.

use std::process;

use clap::Parser as ClapParser;

use linepack::LinepackError;
use linepack::batch::{BatchEvent, convert_all_with, resolve_inputs};
use linepack::cli::Args;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when at least one file failed.
fn run() -> Result<bool, LinepackError> {
    let args = <Args as ClapParser>::parse();
    let options = args.batch_options()?;

    let inputs = resolve_inputs(&args.inputs)?;
    if inputs.is_empty() {
        let searched: Vec<_> = args.inputs.iter().map(|p| p.display().to_string()).collect();
        eprintln!("Warning: no .txt files found in {}", searched.join(", "));
        return Ok(true);
    }

    let quiet = args.quiet;
    let report = convert_all_with(&inputs, &args.output, &options, |event| match event {
        BatchEvent::Started(input) => {
            if !quiet {
                println!("Processing: {}", input.display());
            }
        }
        BatchEvent::Converted(file) => {
            if !quiet {
                println!(
                    "  -> Output: {} ({} messages, {} excluded)",
                    file.output.display(),
                    file.emitted,
                    file.excluded
                );
            }
        }
        BatchEvent::Failed(failure) => {
            eprintln!(
                "Error processing {}: {}",
                failure.input.display(),
                failure.error
            );
        }
    });

    if !quiet {
        println!();
        println!(
            "Total: {} messages parsed from {} files ({} excluded)",
            report.total_messages(),
            inputs.len(),
            report.total_excluded()
        );
    }

    Ok(!report.has_failures())
}
