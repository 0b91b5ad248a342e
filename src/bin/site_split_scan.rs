//! Template scanner binary
//!
//! Prints the cell table resolved from a template so it can be checked by hand
//! or saved as the static fallback map.

use clap::{CommandFactory, Parser};
use site_split::cli;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "site-split-scan")]
#[command(version)]
#[command(about = "Print the Site Split cell table resolved from a template")]
struct Args {
    /// Template workbook (.xlsx)
    template: Option<PathBuf>,

    /// YAML export configuration (only the layout section is used)
    #[arg(short, long, env = "SITE_SPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Show anchor row, columns and label rows
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(template) = args.template else {
        eprintln!("{}", Args::command().render_usage());
        return ExitCode::from(1);
    };

    cli::init_logging(args.verbose);
    match cli::scan(&template, args.config.as_deref(), args.verbose) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
