use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser;

use crate::lookup::engine::DEFAULT_WORKERS;
use crate::report::ExportFormat;
use crate::semrush::client::API_BASE;

/// Bulk keyword search-volume lookups against the SEMrush API.
#[derive(Parser, Debug)]
#[command(name = "kwvol", version, about, long_about = None)]
pub struct Args {
    /// SEMrush API key
    #[arg(long, env = "SEMRUSH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Regional database: us, uk, ca, au, or any other SEMrush database code
    #[arg(short, long, env = "SEMRUSH_DATABASE", default_value = "us")]
    pub database: String,

    /// Comma-separated keywords (e.g. "seo, content marketing")
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Keyword file: one keyword per row, optionally under a "keyword" header
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Include the CPC column
    #[arg(long)]
    pub cpc: bool,

    /// Maximum concurrent requests
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub workers: usize,

    /// Minimum milliseconds between request starts (0 = no throttling)
    #[arg(long, default_value_t = 0)]
    pub min_interval_ms: u64,

    /// Per-request timeout in seconds (unset = no timeout)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Rows shown in the preview table (0 = all)
    #[arg(long, default_value_t = crate::report::DEFAULT_PREVIEW_ROWS)]
    pub preview: usize,

    /// Export path ("-" for stdout)
    #[arg(short, long, default_value = crate::report::DEFAULT_EXPORT_PATH)]
    pub output: PathBuf,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Field delimiter for CSV export: a single ASCII character, or "tab"
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// API base URL
    #[arg(long, env = "SEMRUSH_BASE_URL", default_value = API_BASE, hide = true)]
    pub base_url: String,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(format!("expected a single ASCII character, got '{other}'")),
    }
}
