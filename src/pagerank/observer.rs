//! Iteration observer — hooks for logging and convergence tracking.
//!
//! The engine notifies an observer after every completed iteration with an
//! [`IterationReport`]. The rank slice passed alongside is valid only for
//! the duration of the callback's borrow; the engine overwrites it in place
//! on the next iteration, so observers must copy what they keep.

use std::time::{Duration, Instant};

/// One completed iteration's telemetry.
#[derive(Debug, Clone, Copy)]
pub struct IterationReport {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Wall-clock time the iteration took.
    pub elapsed: Duration,
    /// `(min, max)` of `rank[i] / prev_rank[i]` over ids where both are
    /// nonzero. Both bounds approach 1.0 as the vector converges. `None`
    /// when no id qualifies.
    pub change_ratio: Option<(f64, f64)>,
}

/// Wall-clock timer for one iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterClock {
    start: Instant,
}

impl IterClock {
    /// Start timing.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed since `start`.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Receives a callback after each iteration of [`Pagerank::run`].
///
/// [`Pagerank::run`]: crate::pagerank::Pagerank::run
pub trait RankObserver {
    /// Called after iteration `report.iteration` has fully completed.
    /// `ranks` is the freshly-updated vector, indexed by page id.
    fn on_iteration_end(&mut self, _report: &IterationReport, _ranks: &[f64]) {}
}

/// Observer that does nothing. Zero overhead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RankObserver for NoopObserver {}

/// Observer that records every [`IterationReport`]. Useful in tests and for
/// post-run convergence analysis.
#[derive(Debug, Default)]
pub struct TimingObserver {
    reports: Vec<IterationReport>,
}

impl TimingObserver {
    /// Create an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports collected so far, in iteration order.
    pub fn reports(&self) -> &[IterationReport] {
        &self.reports
    }
}

impl RankObserver for TimingObserver {
    fn on_iteration_end(&mut self, report: &IterationReport, _ranks: &[f64]) {
        self.reports.push(*report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_measures_elapsed() {
        let clock = IterClock::start();
        assert!(clock.elapsed() >= Duration::ZERO);
    }

    #[test]
    fn test_timing_observer_collects_reports() {
        let mut obs = TimingObserver::new();
        let report = IterationReport {
            iteration: 0,
            elapsed: Duration::from_millis(1),
            change_ratio: Some((0.9, 1.1)),
        };
        obs.on_iteration_end(&report, &[1.0]);
        obs.on_iteration_end(
            &IterationReport {
                iteration: 1,
                ..report
            },
            &[1.0],
        );

        assert_eq!(obs.reports().len(), 2);
        assert_eq!(obs.reports()[1].iteration, 1);
    }
}
