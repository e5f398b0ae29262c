use std::time::{Duration, Instant};

use tracing::debug;

/// Collects timings of a repeated section and logs a summary now and then.
pub struct Perf {
    start: Instant,
    durations: Vec<Duration>,
    last_report: Instant,
    description: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfSummary {
    pub runs: usize,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl Perf {
    pub fn new(description: &str) -> Self {
        Self {
            start: Instant::now(),
            durations: Vec::new(),
            last_report: Instant::now(),
            description: description.to_owned(),
        }
    }

    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn stop(&mut self) {
        self.durations.push(self.start.elapsed());
    }

    pub fn record(&mut self, duration: Duration) {
        self.durations.push(duration);
    }

    pub fn summary(&self) -> Option<PerfSummary> {
        let runs = self.durations.len();
        let total: Duration = self.durations.iter().sum();
        Some(PerfSummary {
            runs,
            mean: total / u32::try_from(runs).ok().filter(|&n| n > 0)?,
            min: *self.durations.iter().min()?,
            max: *self.durations.iter().max()?,
        })
    }

    /// Logs and resets the collected timings once `interval` has passed
    /// since the previous report.
    pub fn report_after(&mut self, interval: Duration) -> Option<PerfSummary> {
        if self.last_report.elapsed() < interval {
            return None;
        }
        self.last_report = Instant::now();

        let summary = self.summary()?;
        debug!(
            "{}: runs {}, mean {:.3} ms, min {:.3} ms, max {:.3} ms",
            self.description,
            summary.runs,
            summary.mean.as_secs_f64() * 1000.0,
            summary.min.as_secs_f64() * 1000.0,
            summary.max.as_secs_f64() * 1000.0,
        );
        self.durations.clear();
        Some(summary)
    }
}
