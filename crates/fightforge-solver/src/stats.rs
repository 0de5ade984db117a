//! Search statistics.

use std::time::{Duration, Instant};

/// Counters for one search run.
///
/// # Example
///
/// ```
/// use fightforge_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_chunk(50_000, 1_200);
/// stats.record_chunk(10_000, 0);
///
/// assert_eq!(stats.chunks, 2);
/// assert_eq!(stats.processed, 60_000);
/// assert_eq!(stats.retained, 1_200);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Chunks completed.
    pub chunks: u64,
    /// Combinations scored, counting every pass.
    pub processed: u64,
    /// Combinations that passed the budget filter.
    pub retained: u64,
}

impl SearchStats {
    /// Marks the start of the run.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_chunk(&mut self, processed: u64, retained: u64) {
        self.chunks += 1;
        self.processed += processed;
        self.retained += retained;
    }

    /// Combinations scored per second.
    pub fn speed(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.processed as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of enumerated combinations that passed the filter.
    pub fn retention_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.retained as f64 / self.processed as f64
        }
    }
}

/// Turns a processed count into progress percentages, reporting only
/// strict increases.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent for `processed` of `total`, if it exceeds the last report.
    pub fn observe(&mut self, processed: u64, total: u64) -> Option<u8> {
        let percent = percent_of(processed, total);
        match self.last {
            Some(last) if percent <= last => None,
            _ => {
                self.last = Some(percent);
                Some(percent)
            }
        }
    }

    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

/// `floor(processed * 100 / total)`, capped at 100.
pub fn percent_of(processed: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let scaled = (processed as u128 * 100) / total as u128;
    scaled.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(0, 10), 0);
        assert_eq!(percent_of(50_000, 214_358_881), 0);
        assert_eq!(percent_of(2_143_589, 214_358_881), 1);
        assert_eq!(percent_of(214_358_881, 214_358_881), 100);
    }

    #[test]
    fn test_tracker_reports_strict_increases() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe(1, 1000), Some(0));
        assert_eq!(tracker.observe(5, 1000), None);
        assert_eq!(tracker.observe(10, 1000), Some(1));
        assert_eq!(tracker.observe(10, 1000), None);
        assert_eq!(tracker.observe(1000, 1000), Some(100));
        assert_eq!(tracker.last(), Some(100));
    }

    #[test]
    fn test_retention_rate() {
        let mut stats = SearchStats::default();
        assert_eq!(stats.retention_rate(), 0.0);
        stats.record_chunk(100, 25);
        assert_eq!(stats.retention_rate(), 0.25);
    }
}
