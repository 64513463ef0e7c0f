//! Keyword collection from free text or a keyword file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Header names that mark the keyword column in an uploaded file.
const KEYWORD_HEADERS: &[&str] = &["keyword", "keywords", "phrase", "query"];

#[derive(Debug, thiserror::Error)]
pub enum KeywordFileError {
    #[error("cannot read keyword file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed keyword file: {0}")]
    Csv(#[from] csv::Error),
}

/// Split comma-separated text into trimmed, non-empty keywords, keeping order.
pub fn keywords_from_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn keywords_from_file(path: &Path) -> Result<Vec<String>, KeywordFileError> {
    let bytes = std::fs::read(path).map_err(|source| KeywordFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let keywords = keywords_from_bytes(&bytes)?;
    debug!(path = %path.display(), count = keywords.len(), "keywords loaded from file");
    Ok(keywords)
}

/// Parse keyword file content: one keyword per row, either under a recognized
/// header column or, without one, the first field of every row.
pub fn keywords_from_bytes(bytes: &[u8]) -> Result<Vec<String>, KeywordFileError> {
    let text = decode(bytes);
    let delimiter = sniff_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(first) = records.next().transpose()? else {
        return Ok(Vec::new());
    };

    let header_column = first
        .iter()
        .position(|field| KEYWORD_HEADERS.contains(&field.to_ascii_lowercase().as_str()));

    let mut keywords = Vec::new();
    let column = match header_column {
        Some(idx) => idx,
        None => {
            push_field(&mut keywords, first.get(0));
            0
        }
    };

    for record in records {
        let record = record?;
        push_field(&mut keywords, record.get(column));
    }

    Ok(keywords)
}

fn push_field(keywords: &mut Vec<String>, field: Option<&str>) {
    if let Some(value) = field.map(str::trim).filter(|v| !v.is_empty()) {
        keywords.push(value.to_string());
    }
}

/// UTF-8 (BOM-aware) first, then Windows-1252 as spreadsheet exports often use it.
fn decode(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    warn!("keyword file is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .map(|d| (d, first_line.bytes().filter(|&b| b == d).count()))
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn text_is_split_trimmed_and_filtered() {
        assert_eq!(
            keywords_from_text(" seo , marketing,,  ,rust lang "),
            vec!["seo", "marketing", "rust lang"]
        );
    }

    #[test]
    fn empty_text_gives_no_keywords() {
        assert!(keywords_from_text("").is_empty());
        assert!(keywords_from_text(" , ,").is_empty());
    }

    #[test]
    fn file_without_header_uses_every_row() {
        let kws = keywords_from_bytes(b"seo\nmarketing\n\nppc\n").unwrap();
        assert_eq!(kws, vec!["seo", "marketing", "ppc"]);
    }

    #[test]
    fn file_with_keyword_header_uses_that_column() {
        let kws = keywords_from_bytes(b"id,Keyword,notes\n1,seo,x\n2,marketing,y\n").unwrap();
        assert_eq!(kws, vec!["seo", "marketing"]);
    }

    #[test]
    fn semicolon_delimited_file_is_detected() {
        let kws = keywords_from_bytes(b"rank;phrase\n1;seo tools\n2;link building\n").unwrap();
        assert_eq!(kws, vec!["seo tools", "link building"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let kws = keywords_from_bytes(b"keyword\n\"shoes, red\"\nhats\n").unwrap();
        assert_eq!(kws, vec!["shoes, red", "hats"]);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let kws = keywords_from_bytes(b"\xEF\xBB\xBFkeyword\ncaf\xC3\xA9\n").unwrap();
        assert_eq!(kws, vec!["café"]);
    }

    #[test]
    fn windows_1252_fallback() {
        let kws = keywords_from_bytes(b"caf\xE9\nna\xEFve\n").unwrap();
        assert_eq!(kws, vec!["café", "naïve"]);
    }

    #[test]
    fn empty_file_gives_no_keywords() {
        assert!(keywords_from_bytes(b"").unwrap().is_empty());
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "keywords").unwrap();
        writeln!(file, "seo").unwrap();
        writeln!(file, "marketing").unwrap();

        let kws = keywords_from_file(file.path()).unwrap();
        assert_eq!(kws, vec!["seo", "marketing"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = keywords_from_file(Path::new("/nonexistent/keywords.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/keywords.csv"));
    }
}
