use tracing::{debug, warn};

use super::types::{Database, KeywordRow};

const SEARCH_VOLUME: &str = "Search Volume";
const DATE: &str = "Date";
const CPC: &str = "CPC";

/// Rows extracted from one keyword's response.
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<KeywordRow>,
    /// Data rows dropped because a required field was absent or unreadable.
    pub skipped: usize,
}

/// Upstream reports failures in-band as `ERROR <code> :: <message>` with no header.
pub fn upstream_error(lines: &[String]) -> Option<&str> {
    lines
        .first()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("ERROR "))
}

/// Parse a semicolon-delimited response (header line first) into rows tagged
/// with the originating keyword and database.
pub fn parse_rows(
    lines: &[String],
    keyword: &str,
    database: &Database,
    include_cpc: bool,
) -> ParsedRows {
    if let Some(message) = upstream_error(lines) {
        warn!(keyword, %message, "upstream returned an error body");
        return ParsedRows::default();
    }

    let body = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            warn!(keyword, error = %e, "unreadable header line");
            return ParsedRows::default();
        }
    };

    let position = |name: &str| headers.iter().position(|h| h == name);
    let volume_idx = position(SEARCH_VOLUME);
    let date_idx = position(DATE);
    let cpc_idx = if include_cpc { position(CPC) } else { None };

    let mut parsed = ParsedRows::default();
    for (line_no, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!(keyword, line = line_no + 2, error = %e, "skipping malformed line");
                parsed.skipped += 1;
                continue;
            }
        };

        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);

        let (Some(search_volume), Some(date)) = (field(volume_idx), field(date_idx)) else {
            debug!(keyword, line = line_no + 2, "missing Search Volume or Date, row skipped");
            parsed.skipped += 1;
            continue;
        };

        let cpc = if include_cpc {
            match field(cpc_idx) {
                Some(cpc) => Some(cpc),
                None => {
                    debug!(keyword, line = line_no + 2, "missing CPC, row skipped");
                    parsed.skipped += 1;
                    continue;
                }
            }
        } else {
            None
        };

        parsed.rows.push(KeywordRow {
            date,
            database: database.to_string(),
            keyword: keyword.to_string(),
            search_volume,
            cpc,
        });
    }

    if parsed.skipped > 0 {
        warn!(keyword, skipped = parsed.skipped, "rows skipped during extraction");
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(body: &str) -> Vec<String> {
        body.lines().map(str::to_string).collect()
    }

    fn us() -> Database {
        Database::new("us").unwrap()
    }

    #[test]
    fn extracts_rows_tagged_with_keyword_and_database() {
        let body = lines("Keyword;Search Volume;Date\nseo;1000;20240101\nseo;900;20231201");
        let parsed = parse_rows(&body, "seo", &us(), false);

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.rows[0].search_volume, "1000");
        assert_eq!(parsed.rows[0].date, "20240101");
        assert_eq!(parsed.rows[0].keyword, "seo");
        assert_eq!(parsed.rows[0].database, "us");
        assert!(parsed.rows[0].cpc.is_none());
    }

    #[test]
    fn header_only_yields_no_rows() {
        let parsed = parse_rows(&lines("Keyword;Search Volume;Date"), "seo", &us(), false);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn missing_column_skips_every_row() {
        let body = lines("Keyword;Search Volume\nseo;1000\nseo;900");
        let parsed = parse_rows(&body, "seo", &us(), false);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn short_row_is_skipped_and_others_kept() {
        let body = lines("Keyword;Date;Search Volume\nseo;20240101\nseo;20240101;700");
        let parsed = parse_rows(&body, "seo", &us(), false);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].search_volume, "700");
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn cpc_extracted_when_requested() {
        let body = lines("Keyword;Search Volume;CPC;Date\nseo;1000;2.35;20240101");
        let parsed = parse_rows(&body, "seo", &us(), true);
        assert_eq!(parsed.rows[0].cpc.as_deref(), Some("2.35"));
    }

    #[test]
    fn cpc_required_when_requested() {
        let body = lines("Keyword;Search Volume;Date\nseo;1000;20240101");
        let parsed = parse_rows(&body, "seo", &us(), true);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn cpc_ignored_when_not_requested() {
        let body = lines("Keyword;Search Volume;CPC;Date\nseo;1000;2.35;20240101");
        let parsed = parse_rows(&body, "seo", &us(), false);
        assert!(parsed.rows[0].cpc.is_none());
    }

    #[test]
    fn upstream_error_body_yields_no_rows() {
        let body = lines("ERROR 50 :: NOTHING FOUND");
        assert_eq!(upstream_error(&body), Some("ERROR 50 :: NOTHING FOUND"));
        let parsed = parse_rows(&body, "zzz", &us(), false);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn empty_body_yields_no_rows() {
        let parsed = parse_rows(&[], "seo", &us(), false);
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn header_whitespace_is_tolerated() {
        let body = lines("Keyword; Search Volume ; Date\r\nseo; 1000 ; 20240101");
        let parsed = parse_rows(&body, "seo", &us(), false);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].search_volume, "1000");
    }
}
