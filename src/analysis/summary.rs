// src/analysis/summary.rs
//! View models derived from a [`ResultSet`]. Nothing here touches egui
//! drawing, the ui module turns these into widgets.

use std::f64::consts::TAU;

use super::sentiment::{AnalysisResult, ResultSet, SentimentClass};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub neutral: usize,
    pub positive: usize,
    pub negative: usize,
}

impl Statistics {
    pub fn from_results(results: &ResultSet) -> Self {
        let mut stats = Statistics {
            total: results.len(),
            ..Default::default()
        };

        for result in results.iter() {
            match result.sentiment {
                SentimentClass::Neutral => stats.neutral += 1,
                SentimentClass::Positive => stats.positive += 1,
                SentimentClass::Negative => stats.negative += 1,
            }
        }

        stats
    }

    pub fn count(&self, class: SentimentClass) -> usize {
        match class {
            SentimentClass::Neutral => self.neutral,
            SentimentClass::Positive => self.positive,
            SentimentClass::Negative => self.negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub text: String,
    pub sentiment: SentimentClass,
    pub label: &'static str,
    pub confidence: String,
}

impl From<&AnalysisResult> for TableRow {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            id: result.id.to_string(),
            text: result.text.clone(),
            sentiment: result.sentiment,
            label: result.sentiment.label(),
            confidence: format_percent(result.confidence),
        }
    }
}

pub fn table_rows(results: &ResultSet) -> Vec<TableRow> {
    results.iter().map(TableRow::from).collect()
}

pub fn format_percent(confidence: f64) -> String {
    format!("{}%", format_fixed(confidence * 100.0, 1))
}

/// Fixed-point text with ties rounded away from zero (`0.5625` -> `0.563`).
pub fn format_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * scale).round() / scale)
}

pub const BUCKET_LABELS: [&str; 5] = ["0-20%", "21-40%", "41-60%", "61-80%", "81-100%"];
pub const BUCKET_SERIES_NAME: &str = "Количество текстов";

/// Index of the confidence bucket: upper bounds are inclusive, the first
/// bucket also takes everything at or below zero.
pub fn bucket_index(confidence: f64) -> usize {
    if confidence <= 0.2 {
        0
    } else if confidence <= 0.4 {
        1
    } else if confidence <= 0.6 {
        2
    } else if confidence <= 0.8 {
        3
    } else {
        4
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfidenceBuckets {
    pub counts: [usize; 5],
}

impl ConfidenceBuckets {
    pub fn from_results(results: &ResultSet) -> Self {
        let mut counts = [0; 5];
        for result in results.iter() {
            counts[bucket_index(result.confidence)] += 1;
        }
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        BUCKET_LABELS.iter().copied().zip(self.counts.iter().copied())
    }
}

/// One doughnut segment. Angles are radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSlice {
    pub class: SentimentClass,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

pub fn distribution_slices(stats: &Statistics) -> Vec<DistributionSlice> {
    if stats.total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    SentimentClass::ALL
        .iter()
        .map(|&class| {
            let count = stats.count(class);
            let fraction = count as f64 / stats.total as f64;
            let start_angle = angle;
            angle += fraction * TAU;
            DistributionSlice {
                class,
                count,
                fraction,
                start_angle,
                end_angle: angle,
            }
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sentiment::ResultOrigin;

    fn set(items: &[(SentimentClass, f64)]) -> ResultSet {
        let results = items
            .iter()
            .enumerate()
            .map(|(i, (class, confidence))| {
                AnalysisResult::new(i as i64, format!("t{}", i), *class, *confidence, None).unwrap()
            })
            .collect();
        ResultSet::new(results, ResultOrigin::SingleText).unwrap()
    }

    #[test]
    fn statistics_sum_to_total() {
        let results = set(&[
            (SentimentClass::Neutral, 0.5),
            (SentimentClass::Positive, 0.9),
            (SentimentClass::Positive, 0.7),
            (SentimentClass::Negative, 0.1),
        ]);
        let stats = Statistics::from_results(&results);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.neutral + stats.positive + stats.negative, stats.total);
        assert_eq!(stats.positive, 2);
    }

    #[test]
    fn bucket_boundaries_are_upper_inclusive() {
        assert_eq!(bucket_index(0.0), 0);
        assert_eq!(bucket_index(0.2), 0);
        assert_eq!(bucket_index(0.2001), 1);
        assert_eq!(bucket_index(0.4), 1);
        assert_eq!(bucket_index(0.6), 2);
        assert_eq!(bucket_index(0.8), 3);
        assert_eq!(bucket_index(0.8001), 4);
        assert_eq!(bucket_index(1.0), 4);
    }

    #[test]
    fn buckets_partition_every_result() {
        let items: Vec<(SentimentClass, f64)> = (0..=100)
            .map(|i| (SentimentClass::Neutral, i as f64 / 100.0))
            .collect();
        let buckets = ConfidenceBuckets::from_results(&set(&items));
        assert_eq!(buckets.total(), 101);
        assert_eq!(buckets.counts, [21, 20, 20, 20, 20]);
    }

    #[test]
    fn table_row_formats_label_and_percent() {
        let result =
            AnalysisResult::new(1, "good", SentimentClass::Positive, 0.93, None).unwrap();
        let row = TableRow::from(&result);
        assert_eq!(row.id, "1");
        assert_eq!(row.text, "good");
        assert_eq!(row.label, "Положительная");
        assert_eq!(row.confidence, "93.0%");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_fixed(0.5625, 3), "0.563");
        assert_eq!(format_fixed(0.0625, 3), "0.063");
        assert_eq!(format_fixed(0.5555555, 3), "0.556");
        assert_eq!(format_percent(0.0125), "1.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn slices_cover_full_circle_and_skip_empty_classes() {
        let results = set(&[
            (SentimentClass::Neutral, 0.5),
            (SentimentClass::Negative, 0.5),
            (SentimentClass::Negative, 0.5),
            (SentimentClass::Negative, 0.5),
        ]);
        let slices = distribution_slices(&Statistics::from_results(&results));
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].class, SentimentClass::Neutral);
        assert!((slices[0].fraction - 0.25).abs() < 1e-12);
        assert!((slices[1].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn no_slices_without_results() {
        assert!(distribution_slices(&Statistics::default()).is_empty());
    }
}
