//! Shot histogram returned by the shot loop

use std::collections::BTreeMap;
use std::fmt;

/// Measurement outcome counts over a run of shots
///
/// Maps basis outcomes (full-width or compacted, depending on the
/// measurement selection) to how often they were observed. Outcomes are
/// kept ordered so iteration and display are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotHistogram {
    counts: BTreeMap<usize, usize>,
    total_shots: usize,
}

impl ShotHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed outcome
    pub fn record(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.total_shots += 1;
    }

    /// Count for a specific outcome (0 if never observed)
    pub fn count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Empirical frequency of an outcome
    pub fn frequency(&self, outcome: usize) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.count(outcome) as f64 / self.total_shots as f64
        }
    }

    /// Total number of recorded shots
    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Number of distinct outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// The underlying outcome → count map
    pub fn counts(&self) -> &BTreeMap<usize, usize> {
        &self.counts
    }

    /// The outcome observed most often
    pub fn most_common(&self) -> Option<(usize, usize)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&outcome, &count)| (outcome, count))
    }
}

impl fmt::Display for ShotHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} shots:", self.total_shots)?;
        for (outcome, count) in &self.counts {
            writeln!(
                f,
                "  {:b}: {} ({:.2}%)",
                outcome,
                count,
                *count as f64 / self.total_shots as f64 * 100.0
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_query() {
        let mut hist = ShotHistogram::new();
        for _ in 0..3 {
            hist.record(0);
        }
        hist.record(5);

        assert_eq!(hist.total_shots(), 4);
        assert_eq!(hist.count(0), 3);
        assert_eq!(hist.count(5), 1);
        assert_eq!(hist.count(2), 0);
        assert_eq!(hist.num_outcomes(), 2);
        assert_eq!(hist.most_common(), Some((0, 3)));
    }

    #[test]
    fn test_frequency() {
        let mut hist = ShotHistogram::new();
        hist.record(1);
        hist.record(1);
        hist.record(0);
        hist.record(3);

        assert!((hist.frequency(1) - 0.5).abs() < 1e-12);
        assert!((hist.frequency(0) - 0.25).abs() < 1e-12);
        assert_eq!(hist.frequency(7), 0.0);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = ShotHistogram::new();
        assert_eq!(hist.total_shots(), 0);
        assert_eq!(hist.frequency(0), 0.0);
        assert_eq!(hist.most_common(), None);
    }
}
