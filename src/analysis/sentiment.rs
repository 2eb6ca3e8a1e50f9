// src/analysis/sentiment.rs

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};
use eframe::egui::Color32;

use super::summary::format_fixed;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentClass {
    Neutral,
    Positive,
    Negative,
}

impl SentimentClass {
    pub const ALL: [SentimentClass; 3] = [
        SentimentClass::Neutral,
        SentimentClass::Positive,
        SentimentClass::Negative,
    ];

    /// Wire value used by the backend and in exported files.
    pub fn code(self) -> i64 {
        match self {
            SentimentClass::Neutral => 0,
            SentimentClass::Positive => 1,
            SentimentClass::Negative => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentClass::Neutral => "Нейтральная",
            SentimentClass::Positive => "Положительная",
            SentimentClass::Negative => "Негативная",
        }
    }

    // Chart legend wording
    pub fn plural_label(self) -> &'static str {
        match self {
            SentimentClass::Neutral => "Нейтральные",
            SentimentClass::Positive => "Положительные",
            SentimentClass::Negative => "Негативные",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            SentimentClass::Neutral => Color32::from_rgb(0x6c, 0x75, 0x7d),
            SentimentClass::Positive => Color32::from_rgb(0x28, 0xa7, 0x45),
            SentimentClass::Negative => Color32::from_rgb(0xdc, 0x35, 0x45),
        }
    }
}

impl TryFrom<i64> for SentimentClass {
    type Error = ClientError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(SentimentClass::Neutral),
            1 => Ok(SentimentClass::Positive),
            2 => Ok(SentimentClass::Negative),
            other => Err(ClientError::Decode(format!("unknown sentiment class {}", other))),
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub id: i64,
    pub text: String,
    pub sentiment: SentimentClass,
    pub confidence: f64,
    pub source: Option<String>,
}

impl AnalysisResult {
    pub fn new(
        id: i64,
        text: impl Into<String>,
        sentiment: SentimentClass,
        confidence: f64,
        source: Option<String>,
    ) -> Result<Self> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ClientError::Decode(format!(
                "confidence {} for item {} is outside [0, 1]",
                confidence, id
            )));
        }

        Ok(Self {
            id,
            text: text.into(),
            sentiment,
            confidence,
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultOrigin {
    SingleText,
    File(String),
}

impl fmt::Display for ResultOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultOrigin::SingleText => f.write_str("одиночный текст"),
            ResultOrigin::File(name) => write!(f, "файл \"{}\"", name),
        }
    }
}

/// Results of one analysis run, in response order.
#[derive(Debug, Clone)]
pub struct ResultSet {
    results: Vec<AnalysisResult>,
    pub origin: ResultOrigin,
    pub completed_at: DateTime<Local>,
}

impl ResultSet {
    pub fn new(results: Vec<AnalysisResult>, origin: ResultOrigin) -> Result<Self> {
        let mut seen = HashSet::with_capacity(results.len());
        for result in &results {
            if !seen.insert(result.id) {
                return Err(ClientError::Decode(format!("duplicate result id {}", result.id)));
            }
        }

        Ok(Self {
            results,
            origin,
            completed_at: Local::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisResult> {
        self.results.iter()
    }
}

/// A labeled row from an evaluation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalRow {
    pub text: String,
    pub true_label: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub rows: usize,
    pub y_true: Vec<i64>,
    pub y_pred: Vec<i64>,
    pub f1: f64,
}

impl EvaluationReport {
    pub fn summary(&self) -> String {
        format!("Macro-F1: {}", format_fixed(self.f1, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, sentiment: SentimentClass) -> AnalysisResult {
        AnalysisResult::new(id, "text", sentiment, 0.5, None).unwrap()
    }

    #[test]
    fn class_codes_map_to_localized_labels() {
        assert_eq!(SentimentClass::try_from(0i64).unwrap().label(), "Нейтральная");
        assert_eq!(SentimentClass::try_from(1i64).unwrap().label(), "Положительная");
        assert_eq!(SentimentClass::try_from(2i64).unwrap().label(), "Негативная");
        for class in SentimentClass::ALL {
            assert_eq!(SentimentClass::try_from(class.code()).unwrap(), class);
        }
    }

    #[test]
    fn unknown_class_is_rejected() {
        assert!(matches!(SentimentClass::try_from(3i64), Err(ClientError::Decode(_))));
        assert!(matches!(SentimentClass::try_from(-1i64), Err(ClientError::Decode(_))));
    }

    #[test]
    fn confidence_must_lie_in_unit_interval() {
        assert!(AnalysisResult::new(0, "a", SentimentClass::Neutral, 0.0, None).is_ok());
        assert!(AnalysisResult::new(0, "a", SentimentClass::Neutral, 1.0, None).is_ok());
        assert!(AnalysisResult::new(0, "a", SentimentClass::Neutral, 1.01, None).is_err());
        assert!(AnalysisResult::new(0, "a", SentimentClass::Neutral, -0.1, None).is_err());
        assert!(AnalysisResult::new(0, "a", SentimentClass::Neutral, f64::NAN, None).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let set = ResultSet::new(
            vec![result(1, SentimentClass::Neutral), result(1, SentimentClass::Positive)],
            ResultOrigin::SingleText,
        );
        assert!(set.is_err());
    }

    #[test]
    fn result_set_keeps_response_order() {
        let set = ResultSet::new(
            vec![result(2, SentimentClass::Negative), result(0, SentimentClass::Neutral)],
            ResultOrigin::File("a.csv".to_string()),
        )
        .unwrap();
        let ids: Vec<i64> = set.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 0]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn evaluation_summary_uses_three_decimals() {
        let report = EvaluationReport {
            rows: 3,
            y_true: vec![0, 1, 2],
            y_pred: vec![0, 1, 1],
            f1: 0.5555555,
        };
        assert_eq!(report.summary(), "Macro-F1: 0.556");
    }

    #[test]
    fn evaluation_summary_rounds_ties_up() {
        let report = EvaluationReport {
            rows: 4,
            y_true: vec![0, 1, 2, 2],
            y_pred: vec![0, 1, 1, 2],
            f1: 0.5625,
        };
        assert_eq!(report.summary(), "Macro-F1: 0.563");
    }
}
