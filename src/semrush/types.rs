use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Databases offered by default. Any other non-empty code is passed through as-is.
pub const KNOWN_DATABASES: &[&str] = &["us", "uk", "ca", "au"];

/// Regional/market identifier understood by the upstream API (e.g. `us`, `uk`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database(String);

impl Database {
    /// Normalizes to lowercase. Returns `None` for blank input.
    pub fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self(code.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_DATABASES.contains(&self.0.as_str())
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output column, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Database,
    Keyword,
    SearchVolume,
    Cpc,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Database => "Database",
            Column::Keyword => "Keyword",
            Column::SearchVolume => "Search Volume",
            Column::Cpc => "CPC",
        }
    }

    pub fn layout(include_cpc: bool) -> &'static [Column] {
        const BASE: &[Column] = &[
            Column::Date,
            Column::Database,
            Column::Keyword,
            Column::SearchVolume,
        ];
        const WITH_CPC: &[Column] = &[
            Column::Date,
            Column::Database,
            Column::Keyword,
            Column::SearchVolume,
            Column::Cpc,
        ];
        if include_cpc { WITH_CPC } else { BASE }
    }
}

/// One result row: a single dated volume figure for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Database")]
    pub database: String,
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Search Volume")]
    pub search_volume: String,
    #[serde(
        rename = "CPC",
        default,
        deserialize_with = "present_column",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpc: Option<String>,
}

/// A present column is `Some`, even when the cell is empty. Only an absent column is `None`.
fn present_column<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    String::deserialize(deserializer).map(Some)
}

impl KeywordRow {
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Date => &self.date,
            Column::Database => &self.database,
            Column::Keyword => &self.keyword,
            Column::SearchVolume => &self.search_volume,
            Column::Cpc => self.cpc.as_deref().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_is_lowercased_and_trimmed() {
        let db = Database::new("  UK ").unwrap();
        assert_eq!(db.as_str(), "uk");
        assert!(db.is_known());
    }

    #[test]
    fn database_rejects_blank() {
        assert!(Database::new("   ").is_none());
    }

    #[test]
    fn database_accepts_free_text_override() {
        let db = Database::new("de").unwrap();
        assert_eq!(db.to_string(), "de");
        assert!(!db.is_known());
    }

    #[test]
    fn layout_appends_cpc_only_when_requested() {
        assert_eq!(Column::layout(false).len(), 4);
        assert_eq!(Column::layout(true).last(), Some(&Column::Cpc));
    }

    #[test]
    fn row_serializes_without_cpc_when_absent() {
        let row = KeywordRow {
            date: "20240101".into(),
            database: "us".into(),
            keyword: "seo".into(),
            search_volume: "1000".into(),
            cpc: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Search Volume"], "1000");
        assert!(json.get("CPC").is_none());
    }

    #[test]
    fn empty_cpc_cell_stays_present() {
        let row: KeywordRow = serde_json::from_str(
            r#"{"Date":"20240101","Database":"us","Keyword":"seo","Search Volume":"1000","CPC":""}"#,
        )
        .unwrap();
        assert_eq!(row.cpc.as_deref(), Some(""));

        let row: KeywordRow = serde_json::from_str(
            r#"{"Date":"20240101","Database":"us","Keyword":"seo","Search Volume":"1000"}"#,
        )
        .unwrap();
        assert!(row.cpc.is_none());
    }
}
