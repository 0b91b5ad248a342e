//! Site Split API Server binary
//!
//! Serves the template export over HTTP.

use clap::Parser;
use site_split::api::{run_api_server, server::ApiConfig};
use site_split::cli::load_config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-split-server")]
#[command(version)]
#[command(about = "Site Split API Server - fills the attendance template over HTTP")]
#[command(long_about = r#"
Site Split API Server

Endpoints:
  - POST /api/download-template - Fill the template, respond with the .xlsx
  - GET  /api/ping              - Status and template presence
  - GET  /health                - Health check

Example usage:
  site-split-server                                  # 127.0.0.1:5000
  site-split-server --host 0.0.0.0 --port 8080

  curl -X POST http://localhost:5000/api/download-template \
    -H "Content-Type: application/json" \
    -d '{"rows": {"VTO": {"Inbound": {"AMZN": 5, "TEMP": 2}}}, "shift": "Day"}' \
    -o report.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SITE_SPLIT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "PORT")]
    port: u16,

    /// YAML export configuration
    #[arg(short, long, env = "SITE_SPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Template workbook (overrides the config's template_path)
    #[arg(short, long, env = "SITE_SPLIT_TEMPLATE")]
    template: Option<PathBuf>,

    /// Directory holding the dashboard (`index.html` is served at `/`)
    #[arg(long, env = "SITE_SPLIT_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Allowed CORS origins, comma separated; any origin when empty
    #[arg(long, env = "SITE_SPLIT_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut export = load_config(args.config.as_deref())?;
    if let Some(template) = args.template {
        export.template_path = template;
    }

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args.allowed_origins,
        static_dir: args.static_dir,
        export,
    };

    run_api_server(config).await
}
