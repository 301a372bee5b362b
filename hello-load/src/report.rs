//! Aggregated outcome of a load run.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx response
    Success,
    /// Non-2xx response with its status code
    HttpFailure(u16),
    /// No response: connect error, timeout, broken body
    TransportError,
}

#[derive(Debug, Default)]
pub struct Summary {
    sent: u64,
    succeeded: u64,
    http_failures: u64,
    transport_errors: u64,
    total_latency: Duration,
    max_latency: Duration,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome, latency: Duration) {
        self.sent += 1;
        match outcome {
            Outcome::Success => self.succeeded += 1,
            Outcome::HttpFailure(_) => self.http_failures += 1,
            Outcome::TransportError => self.transport_errors += 1,
        }
        self.total_latency += latency;
        self.max_latency = self.max_latency.max(latency);
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn success_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        self.succeeded as f64 * 100.0 / self.sent as f64
    }

    /// Success percentage must be strictly above `min_percent`.
    pub fn passes(&self, min_percent: f64) -> bool {
        self.success_percent() > min_percent
    }

    pub fn mean_latency(&self) -> Option<Duration> {
        let sent = u32::try_from(self.sent).ok().filter(|n| *n > 0)?;
        Some(self.total_latency / sent)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "requests sent:     {}", self.sent)?;
        writeln!(f, "succeeded (2xx):   {}", self.succeeded)?;
        writeln!(f, "failed (non-2xx):  {}", self.http_failures)?;
        writeln!(f, "transport errors:  {}", self.transport_errors)?;
        writeln!(f, "success rate:      {:.2}%", self.success_percent())?;
        if let Some(mean) = self.mean_latency() {
            writeln!(f, "mean latency:      {mean:?}")?;
        }
        write!(f, "max latency:       {:?}", self.max_latency)
    }
}
