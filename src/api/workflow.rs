//! The three user actions, from raw input to a finished result. These run on
//! worker threads; nothing here touches UI state.

use tracing::info;

use super::client::SentimentBackend;
use crate::analysis::{EvaluationReport, ResultOrigin, ResultSet};
use crate::error::{ClientError, Result};
use crate::file::input::{parse_comments, parse_eval_rows};
use crate::file::SelectedFile;

pub const EMPTY_TEXT_MESSAGE: &str = "Введите текст";
pub const NO_FILE_MESSAGE: &str = "Выберите CSV";

/// Trimmed text, or an input error when nothing is left.
pub fn prepare_text(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ClientError::Input(EMPTY_TEXT_MESSAGE.to_string()));
    }
    Ok(text.to_string())
}

pub fn analyze_single_text(backend: &dyn SentimentBackend, text: &str) -> Result<ResultSet> {
    let results = backend.analyze_text(text)?;
    ResultSet::new(results, ResultOrigin::SingleText)
}

pub fn analyze_file(backend: &dyn SentimentBackend, file: &SelectedFile) -> Result<ResultSet> {
    let comments = parse_comments(file.open()?)?;
    info!(file = %file.name, rows = comments.len(), "Analyzing file");

    let results = backend.analyze_batch(&comments)?;
    ResultSet::new(results, ResultOrigin::File(file.name.clone()))
}

pub fn evaluate_file(backend: &dyn SentimentBackend, file: &SelectedFile) -> Result<EvaluationReport> {
    let rows = parse_eval_rows(file.open()?)?;
    info!(file = %file.name, rows = rows.len(), "Evaluating file");

    let comments: Vec<String> = rows.iter().map(|row| row.text.clone()).collect();
    let y_pred = backend.predict_batch(&comments)?;
    let y_true: Vec<i64> = rows.iter().map(|row| row.true_label).collect();

    if y_pred.len() != y_true.len() {
        return Err(ClientError::Decode(format!(
            "expected {} predictions, got {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    let f1 = backend.macro_f1(&y_true, &y_pred)?;
    Ok(EvaluationReport {
        rows: rows.len(),
        y_true,
        y_pred,
        f1,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;
    use crate::analysis::summary::table_rows;

    #[test]
    fn blank_text_is_rejected_before_any_request() {
        let err = prepare_text("   \n").unwrap_err();
        assert_eq!(err.to_string(), EMPTY_TEXT_MESSAGE);
        assert_eq!(prepare_text("  hi ").unwrap(), "hi");
    }

    #[test]
    fn single_text_renders_localized_row() {
        let backend = FakeBackend::default();
        let set = analyze_single_text(&backend, "good").unwrap();
        let rows = table_rows(&set);
        assert_eq!(rows[0].label, "Положительная");
        assert_eq!(rows[0].confidence, "93.0%");
    }

    #[test]
    fn file_analysis_sends_text_column() {
        let backend = FakeBackend::default();
        let file = SelectedFile::from_bytes("in.csv", b"text,extra\none,x\ntwo,y\n".to_vec());
        let set = analyze_file(&backend, &file).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.origin, ResultOrigin::File("in.csv".to_string()));
        assert_eq!(backend.batches.lock().unwrap()[0], vec!["one", "two"]);
    }

    #[test]
    fn evaluation_forwards_labels_and_predictions() {
        let backend = FakeBackend {
            predictions: vec![0, 1, 1],
            f1: 0.5556,
            ..Default::default()
        };
        let file = SelectedFile::from_bytes("eval.csv", b"text,label\na,0\nb,1\nc,2\n".to_vec());

        let report = evaluate_file(&backend, &file).unwrap();
        assert_eq!(
            backend.macro_f1_calls.lock().unwrap()[0],
            (vec![0, 1, 2], vec![0, 1, 1])
        );
        assert_eq!(report.summary(), "Macro-F1: 0.556");
    }

    #[test]
    fn prediction_count_mismatch_stops_evaluation() {
        let backend = FakeBackend {
            predictions: vec![0],
            ..Default::default()
        };
        let file = SelectedFile::from_bytes("eval.csv", b"text,label\na,0\nb,1\n".to_vec());

        assert!(matches!(evaluate_file(&backend, &file), Err(ClientError::Decode(_))));
        assert!(backend.macro_f1_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn backend_failure_propagates_message() {
        let backend = FakeBackend {
            fail_with: Some("connection refused".to_string()),
            ..Default::default()
        };
        let err = analyze_single_text(&backend, "x").unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
