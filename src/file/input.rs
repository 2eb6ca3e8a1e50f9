// src/file/input.rs
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use tracing::{debug, warn};

use crate::analysis::EvalRow;
use crate::error::{ClientError, Result};

pub const TEXT_COLUMN: &str = "text";
pub const LABEL_COLUMN: &str = "label";

/// A CSV picked through the file dialog or dropped onto the window.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    path: Option<PathBuf>,
    bytes: Option<Arc<[u8]>>,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path: Some(path), bytes: None }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { name: name.into(), path: None, bytes: Some(bytes.into()) }
    }

    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        if let Some(bytes) = &file.bytes {
            let name = if file.name.is_empty() { "dropped.csv".to_string() } else { file.name.clone() };
            return Some(Self::from_bytes(name, bytes.clone()));
        }
        file.path.clone().map(Self::from_path)
    }

    pub fn open(&self) -> Result<Box<dyn Read + Send>> {
        if let Some(bytes) = &self.bytes {
            return Ok(Box::new(Cursor::new(bytes.clone())));
        }
        match &self.path {
            Some(path) => Ok(Box::new(File::open(path)?)),
            None => Err(ClientError::Input(format!("file \"{}\" has no readable content", self.name))),
        }
    }

    pub fn ready_message(&self) -> String {
        format!("Файл \"{}\" готов к анализу", self.name)
    }

    pub fn placeholder(&self) -> String {
        format!("📄 {}", self.name)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Reads the `text` column of every record. Missing cells become empty
/// strings so that result ids line up with row order.
pub fn parse_comments<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let text_idx = column(&headers, TEXT_COLUMN)
        .ok_or_else(|| ClientError::Input(format!("CSV has no \"{}\" column", TEXT_COLUMN)))?;

    let mut comments = Vec::new();
    for record in reader.records() {
        let record = record?;
        // A lone empty field is a blank line; `,` still counts as a row
        if record.len() == 1 && record.get(0) == Some("") {
            continue;
        }
        comments.push(record.get(text_idx).unwrap_or_default().to_string());
    }

    if comments.is_empty() {
        return Err(ClientError::Input("CSV contains no rows".to_string()));
    }

    debug!(rows = comments.len(), "Parsed comments from CSV");
    Ok(comments)
}

/// Integer prefix of a label cell: optional sign followed by digits,
/// anything after the digits is ignored ("2.0" reads as 2).
pub fn parse_label(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Rows with an empty `text` or a missing/unparseable `label` are skipped.
pub fn parse_eval_rows<R: Read>(reader: R) -> Result<Vec<EvalRow>> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let text_idx = column(&headers, TEXT_COLUMN)
        .ok_or_else(|| ClientError::Input(format!("CSV has no \"{}\" column", TEXT_COLUMN)))?;
    let label_idx = column(&headers, LABEL_COLUMN)
        .ok_or_else(|| ClientError::Input(format!("CSV has no \"{}\" column", LABEL_COLUMN)))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let text = record.get(text_idx).unwrap_or_default();
        let label = record.get(label_idx).and_then(parse_label);

        match label {
            Some(true_label) if !text.is_empty() => rows.push(EvalRow {
                text: text.to_string(),
                true_label,
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = rows.len(), "Skipped evaluation rows without text or label");
    }
    if rows.is_empty() {
        return Err(ClientError::Input("CSV contains no labeled rows".to_string()));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_follow_row_order() {
        let csv = "id,text\n1,отличный сервис\n2,\n3,плохой\n";
        let comments = parse_comments(csv.as_bytes()).unwrap();
        assert_eq!(comments, vec!["отличный сервис", "", "плохой"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let csv = "text\nfirst\n\nsecond\n";
        assert_eq!(parse_comments(csv.as_bytes()).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn rows_of_empty_fields_keep_their_position() {
        let csv = "id,text\n1,a\n,\n3,b\n";
        assert_eq!(parse_comments(csv.as_bytes()).unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn missing_text_column_is_an_input_error() {
        let err = parse_comments("comment\nhello\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ClientError::Input(_)));
    }

    #[test]
    fn header_only_file_is_an_input_error() {
        let err = parse_comments("text\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ClientError::Input(_)));
    }

    #[test]
    fn short_records_yield_empty_text() {
        let csv = "id,text\n1\n2,hi\n";
        assert_eq!(parse_comments(csv.as_bytes()).unwrap(), vec!["", "hi"]);
    }

    #[test]
    fn label_parsing_takes_integer_prefix() {
        assert_eq!(parse_label("1"), Some(1));
        assert_eq!(parse_label(" 2"), Some(2));
        assert_eq!(parse_label("2.0"), Some(2));
        assert_eq!(parse_label("-1"), Some(-1));
        assert_eq!(parse_label(""), None);
        assert_eq!(parse_label("abc"), None);
        assert_eq!(parse_label("-"), None);
    }

    #[test]
    fn eval_rows_filter_incomplete_records() {
        let csv = "text,label\nхороший,1\n,2\nнейтрально,\nплохой,2\nстранно,x\n";
        let rows = parse_eval_rows(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                EvalRow { text: "хороший".to_string(), true_label: 1 },
                EvalRow { text: "плохой".to_string(), true_label: 2 },
            ]
        );
    }

    #[test]
    fn eval_requires_label_column() {
        let err = parse_eval_rows("text\nhello\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ClientError::Input(_)));
    }

    #[test]
    fn selected_file_reads_dropped_bytes() {
        let file = SelectedFile::from_bytes("reviews.csv", b"text\nok\n".to_vec());
        assert_eq!(file.ready_message(), "Файл \"reviews.csv\" готов к анализу");
        assert_eq!(file.placeholder(), "📄 reviews.csv");
        let comments = parse_comments(file.open().unwrap()).unwrap();
        assert_eq!(comments, vec!["ok"]);
    }
}
