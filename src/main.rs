use clap::{Parser, Subcommand};
use site_split::cli::{self, FillOptions};
use site_split::error::SiteSplitResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-split")]
#[command(about = "Fill the Site Split attendance template without touching its formulas.")]
#[command(long_about = "Site Split - attendance workbook filler

Writes AMZN/TEMP headcounts per department into the Site Split template.
Target cells are found by scanning the template's header band; totals,
percentages and any other formula cell are never overwritten. MET rows
always export as zero.

COMMANDS:
  fill   - Write a JSON payload into the template and save the workbook
  scan   - Print the cell table resolved from a template

EXAMPLES:
  site-split fill -t assets/Site_Split.xlsx -p payload.json -o out/
  site-split fill -p payload.json -o report.xlsx --shift Night --date 2025-11-02
  site-split scan assets/Site_Split.xlsx -v")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Write a JSON payload into the template.

PAYLOAD FORMAT (same body the HTTP server accepts):
  {
    \"rows\": { \"VTO\": { \"Inbound\": { \"AMZN\": 5, \"TEMP\": 2 } } },
    \"shift\": \"Day\",
    \"date\": \"2025-11-02\"
  }

Labels or departments the template does not have are ignored.
If OUTPUT is a directory the file is named Attendance_report_<date>_<shift>.xlsx.")]
    /// Fill the template from a JSON payload
    Fill {
        /// Template workbook (defaults to the config's template_path)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// JSON request file
        #[arg(short, long)]
        payload: PathBuf,

        /// Output .xlsx file or directory
        #[arg(short, long)]
        output: PathBuf,

        /// Shift name used in the filename (overrides the payload)
        #[arg(long)]
        shift: Option<String>,

        /// Report date used in the filename (overrides the payload)
        #[arg(long)]
        date: Option<String>,

        /// YAML export configuration
        #[arg(short, long, env = "SITE_SPLIT_CONFIG")]
        config: Option<PathBuf>,

        /// Use a fixed JSON cell table instead of scanning headers
        #[arg(long)]
        static_map: Option<PathBuf>,

        /// Show resolution and write counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the cell table resolved from a template
    Scan {
        /// Template workbook
        template: PathBuf,

        /// YAML export configuration (only the layout section is used)
        #[arg(short, long, env = "SITE_SPLIT_CONFIG")]
        config: Option<PathBuf>,

        /// Show anchor row, columns and label rows
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> SiteSplitResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fill {
            template,
            payload,
            output,
            shift,
            date,
            config,
            static_map,
            verbose,
        } => {
            cli::init_logging(verbose);
            cli::fill(FillOptions {
                template,
                payload,
                output,
                shift,
                date,
                config,
                static_map,
                verbose,
            })
            .map(|_| ())
        }

        Commands::Scan {
            template,
            config,
            verbose,
        } => {
            cli::init_logging(verbose);
            cli::scan(&template, config.as_deref(), verbose).map(|_| ())
        }
    }
}
