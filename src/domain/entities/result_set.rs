//! Ordered batch results and their derived summary.

use serde::{Deserialize, Serialize};

use super::record::BatchRecord;

/// Aggregate counts over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl Summary {
    /// Counts successes and failures in a single pass.
    pub fn from_records<R: BatchRecord>(records: &[R]) -> Self {
        let success = records.iter().filter(|r| r.is_success()).count();

        Self {
            total: records.len(),
            success,
            failed: records.len() - success,
        }
    }

    /// Percentage of successful records, `None` for an empty set.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.success as f64 / self.total as f64 * 100.0)
    }
}

/// Records in input order. Records can be appended but never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<R> {
    records: Vec<R>,
}

impl<R: BatchRecord> ResultSet<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }
}

impl<R: BatchRecord> Default for ResultSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BatchRecord> From<Vec<R>> for ResultSet<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortenResult;
    use crate::domain::errors::ItemError;

    fn sample(successes: usize, failures: usize) -> ResultSet<ShortenResult> {
        let mut set = ResultSet::new();
        for i in 0..successes {
            set.push(ShortenResult::created(
                format!("https://a.com/{i}"),
                format!("https://sv.link/{i}"),
            ));
        }
        for i in 0..failures {
            set.push(ShortenResult::failed(
                format!("https://b.com/{i}"),
                &ItemError::rejected(500),
            ));
        }
        set
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample(3, 1).summary();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.success, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, summary.success + summary.failed);
    }

    #[test]
    fn test_success_rate() {
        assert_eq!(sample(3, 1).summary().success_rate(), Some(75.0));
        assert_eq!(sample(0, 2).summary().success_rate(), Some(0.0));
    }

    #[test]
    fn test_success_rate_of_empty_set_is_undefined() {
        assert_eq!(sample(0, 0).summary().success_rate(), None);
    }
}
