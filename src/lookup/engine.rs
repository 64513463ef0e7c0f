use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::request::VolumeRequest;
use super::throttle::Throttle;
use crate::semrush::parse::parse_rows;
use crate::semrush::{Fetcher, KeywordRow};

pub const DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Maximum requests in flight at once.
    pub workers: usize,
    /// Minimum spacing between request starts; zero disables throttling.
    pub min_interval: Duration,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            min_interval: Duration::ZERO,
        }
    }
}

/// Aggregated output of one batch. `rows` are in completion order, not input order.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub rows: Vec<KeywordRow>,
    pub failed: Vec<FailedKeyword>,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct FailedKeyword {
    pub keyword: String,
    pub reason: String,
}

/// Look up every keyword in `request` with at most `options.workers` requests in flight.
///
/// A failed fetch is recorded in `failed` and does not stop the batch.
/// `on_complete` is called once per keyword as its lookup finishes.
pub async fn lookup_volumes(
    fetcher: &impl Fetcher,
    request: &VolumeRequest,
    options: &DispatchOptions,
    mut on_complete: impl FnMut(&str),
) -> ResultSet {
    let throttle = Throttle::new(options.min_interval);
    let workers = options.workers.max(1);

    info!(
        keywords = request.keywords.len(),
        database = %request.database,
        workers,
        "starting lookup batch"
    );

    let mut outcomes = stream::iter(&request.keywords)
        .map(|keyword| {
            let throttle = &throttle;
            async move {
                throttle.wait().await;
                let result = fetcher
                    .fetch(&request.database, keyword, request.include_cpc)
                    .await;
                (keyword, result)
            }
        })
        .buffer_unordered(workers);

    let mut set = ResultSet::default();
    while let Some((keyword, outcome)) = outcomes.next().await {
        match outcome {
            Ok(lines) => {
                let parsed = parse_rows(&lines, keyword, &request.database, request.include_cpc);
                set.skipped += parsed.skipped;
                set.rows.extend(parsed.rows);
            }
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "lookup failed (continuing with other keywords)");
                set.failed.push(FailedKeyword {
                    keyword: keyword.clone(),
                    reason: e.to_string(),
                });
            }
        }
        on_complete(keyword.as_str());
    }

    info!(
        rows = set.rows.len(),
        failed = set.failed.len(),
        skipped = set.skipped,
        "lookup batch complete"
    );
    set
}
