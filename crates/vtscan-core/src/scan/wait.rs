//! Wait strategies between submission and report fetches.

use std::time::Duration;

/// Delay applied before the first report fetch by default.
pub const DEFAULT_REPORT_DELAY: Duration = Duration::from_millis(3000);

/// Decides how long to wait before each report fetch.
pub trait WaitStrategy: Send + Sync {
    /// Delay before the report fetch numbered `attempt` (0-based).
    /// `None` stops polling.
    fn delay_for(&self, attempt: u32) -> Option<Duration>;
}

impl<W: WaitStrategy + ?Sized> WaitStrategy for Box<W> {
    fn delay_for(&self, attempt: u32) -> Option<Duration> {
        (**self).delay_for(attempt)
    }
}

/// Wait once, fetch once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_REPORT_DELAY)
    }
}

impl WaitStrategy for FixedDelay {
    fn delay_for(&self, attempt: u32) -> Option<Duration> {
        (attempt == 0).then_some(self.0)
    }
}

/// Poll with a growing delay while the report is pending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    pub initial: Duration,
    pub factor: f64,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max_attempts: u32) -> Self {
        Self {
            initial,
            factor: 2.0,
            max_delay: Duration::from_secs(60),
            max_attempts,
        }
    }
}

impl WaitStrategy for ExponentialBackoff {
    fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        // The first wait is the configured delay; only grown delays are capped.
        if attempt == 0 {
            return Some(self.initial);
        }
        let scaled = self.initial.as_secs_f64() * self.factor.powi(attempt as i32);
        let capped = scaled.min(self.max_delay.as_secs_f64());
        Some(Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay))
    }
}
