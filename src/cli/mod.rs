mod errors;
mod params;

pub use errors::CliError;
pub use params::Args;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::input::{keywords_from_file, keywords_from_text};
use crate::lookup::{DispatchOptions, ResultSet, VolumeRequest, lookup_volumes};
use crate::report::{ExportError, render_table, write_rows};
use crate::semrush::{Column, SemrushClient};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one run, for the exit summary.
#[derive(Debug)]
pub struct RunSummary {
    pub keywords: usize,
    pub rows: usize,
    pub failed: usize,
}

/// Collect keywords, look them up, print the preview and write the export.
pub async fn run(args: &Args) -> Result<RunSummary, CliError> {
    let mut keywords = Vec::new();
    if let Some(path) = &args.file {
        keywords.extend(keywords_from_file(path)?);
    }
    if let Some(text) = &args.keywords {
        keywords.extend(keywords_from_text(text));
    }

    let request = VolumeRequest::new(
        args.api_key.as_deref(),
        Some(args.database.as_str()),
        keywords,
        args.cpc,
    )?;

    if !request.database.is_known() {
        warn!(database = %request.database, "unrecognized database code, passing it through");
    }

    let mut builder = Client::builder().connect_timeout(CONNECT_TIMEOUT);
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build()?;
    let client = SemrushClient::new(http, request.api_key.clone(), &args.base_url)?;

    let options = DispatchOptions {
        workers: args.workers,
        min_interval: Duration::from_millis(args.min_interval_ms),
    };

    let progress = progress_bar(request.keywords.len(), args.quiet);
    let results = lookup_volumes(&client, &request, &options, |keyword| {
        progress.set_message(keyword.to_string());
        progress.inc(1);
    })
    .await;
    progress.finish_and_clear();

    let to_stdout = is_stdout(&args.output);
    if !to_stdout {
        print_preview(&results, args);
    }
    export(&results, args)?;
    if !to_stdout {
        info!(path = %args.output.display(), rows = results.rows.len(), "results exported");
    }

    Ok(RunSummary {
        keywords: request.keywords.len(),
        rows: results.rows.len(),
        failed: results.failed.len(),
    })
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

fn print_preview(results: &ResultSet, args: &Args) {
    let columns = Column::layout(args.cpc);
    print!("{}", render_table(&results.rows, columns, args.preview));

    if !results.failed.is_empty() {
        eprintln!("\nFailed keywords:");
        for failed in &results.failed {
            eprintln!("- {} ({})", failed.keyword, failed.reason);
        }
    }
    if results.skipped > 0 {
        eprintln!("\n{} response rows skipped (missing fields)", results.skipped);
    }
}

fn is_stdout(path: &Path) -> bool {
    path == Path::new("-")
}

fn export(results: &ResultSet, args: &Args) -> Result<(), CliError> {
    let outcome = if is_stdout(&args.output) {
        write_rows(
            std::io::stdout().lock(),
            &results.rows,
            args.format,
            args.cpc,
            args.delimiter,
        )
    } else {
        File::create(&args.output)
            .map_err(ExportError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                write_rows(&mut writer, &results.rows, args.format, args.cpc, args.delimiter)?;
                writer.flush()?;
                Ok(())
            })
    };

    outcome.map_err(|source| CliError::Export {
        path: args.output.clone(),
        source,
    })
}
