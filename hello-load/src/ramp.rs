//! Linear request-rate ramp, one step per second.

use anyhow::{Result, ensure};

/// Rate ramps from `start_rate` (first second) to `end_rate` (last second).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    start_rate: u32,
    end_rate: u32,
    duration_secs: u32,
}

impl Ramp {
    pub fn new(start_rate: u32, end_rate: u32, duration_secs: u32) -> Result<Self> {
        ensure!(duration_secs > 0, "duration must be at least one second");
        ensure!(
            start_rate > 0 || end_rate > 0,
            "start and end rate cannot both be zero"
        );

        Ok(Self {
            start_rate,
            end_rate,
            duration_secs,
        })
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Requests to send during `second` (0-based). Zero past the end of the ramp.
    pub fn rate_at(&self, second: u32) -> u32 {
        if second >= self.duration_secs {
            return 0;
        }
        if self.duration_secs == 1 {
            return self.start_rate;
        }

        let progress = f64::from(second) / f64::from(self.duration_secs - 1);
        let delta = f64::from(self.end_rate) - f64::from(self.start_rate);
        (f64::from(self.start_rate) + delta * progress).round() as u32
    }

    pub fn rates(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.duration_secs).map(|s| self.rate_at(s))
    }

    pub fn total_requests(&self) -> u64 {
        self.rates().map(u64::from).sum()
    }
}
