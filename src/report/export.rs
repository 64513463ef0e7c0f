use std::io::Write;

use crate::semrush::{Column, KeywordRow};

pub const DEFAULT_EXPORT_PATH: &str = "keywords_analysis.csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("delimited text error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write rows as delimited text with a header line. The CPC column is
/// written only when `include_cpc` is set.
pub fn write_delimited<W: Write>(
    writer: W,
    rows: &[KeywordRow],
    include_cpc: bool,
    delimiter: u8,
) -> Result<(), ExportError> {
    let columns = Column::layout(include_cpc);
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(columns.iter().map(|c| c.header()))?;
    for row in rows {
        out.write_record(columns.iter().map(|&c| row.field(c)))?;
    }
    out.flush()?;
    Ok(())
}

/// Parse text produced by [`write_delimited`] back into rows.
#[cfg(test)]
pub(crate) fn read_delimited<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Vec<KeywordRow>, ExportError> {
    let mut input = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let rows = input.deserialize().collect::<Result<Vec<KeywordRow>, _>>()?;
    Ok(rows)
}

pub fn write_json<W: Write>(mut writer: W, rows: &[KeywordRow]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn write_rows<W: Write>(
    writer: W,
    rows: &[KeywordRow],
    format: ExportFormat,
    include_cpc: bool,
    delimiter: u8,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_delimited(writer, rows, include_cpc, delimiter),
        ExportFormat::Json => write_json(writer, rows),
    }
}
