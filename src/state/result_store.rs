// src/state/result_store.rs
use crate::analysis::ResultSet;

/// Holds the result set of the latest successful analysis.
#[derive(Debug, Default)]
pub struct ResultStore {
    current: Option<ResultSet>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Whole-set replacement, never merged
    pub fn replace(&mut self, results: ResultSet) {
        self.current = Some(results);
    }

    pub fn current(&self) -> Option<&ResultSet> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.as_ref().map_or(true, ResultSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, ResultOrigin, SentimentClass};

    fn set_of(n: usize) -> ResultSet {
        let results = (0..n)
            .map(|i| AnalysisResult::new(i as i64, "t", SentimentClass::Neutral, 0.5, None).unwrap())
            .collect();
        ResultSet::new(results, ResultOrigin::SingleText).unwrap()
    }

    #[test]
    fn starts_empty() {
        let store = ResultStore::new();
        assert!(store.is_empty());
        assert!(store.current().is_none());
    }

    #[test]
    fn replace_discards_previous_set() {
        let mut store = ResultStore::new();
        store.replace(set_of(3));
        store.replace(set_of(1));
        assert_eq!(store.current().unwrap().len(), 1);
    }

    #[test]
    fn empty_set_counts_as_empty() {
        let mut store = ResultStore::new();
        store.replace(set_of(0));
        assert!(store.is_empty());
    }
}
