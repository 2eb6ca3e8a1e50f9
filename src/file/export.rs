// src/file/export.rs
use std::fs;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::analysis::ResultSet;
use crate::error::{ClientError, Result};

pub const EMPTY_EXPORT_ALERT: &str = "Нет данных для скачивания";

/// `ID,Label` rows with the raw class code. Rows are separated by `\n` and
/// the last row has no terminator.
pub fn results_to_csv(results: &ResultSet) -> Result<String> {
    if results.is_empty() {
        return Err(ClientError::Input(EMPTY_EXPORT_ALERT.to_string()));
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["ID", "Label"])?;
    for result in results.iter() {
        writer.write_record([result.id.to_string(), result.sentiment.code().to_string()])?;
    }

    let bytes = into_bytes(writer)?;
    let mut content = String::from_utf8(bytes)
        .map_err(|e| ClientError::Csv(e.to_string()))?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

fn into_bytes(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| ClientError::Csv(e.to_string()))
}

pub fn save_results(results: &ResultSet, path: &Path) -> Result<()> {
    let content = results_to_csv(results)?;
    fs::write(path, content)?;
    info!(path = %path.display(), rows = results.len(), "Exported results");
    Ok(())
}
