use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};

use super::report::UsageSample;
use super::source::CpuAccounting;

/// Reads one utilization snapshot per call. The caller owns the cadence.
pub struct UsageSampler {
    source: Box<dyn CpuAccounting>,
    expected_cores: usize,
    mismatch_reported: bool,
}

impl UsageSampler {
    /// `expected_cores` is the logical processor count recorded at startup.
    pub fn new(source: Box<dyn CpuAccounting>, expected_cores: usize) -> Self {
        UsageSampler {
            source,
            expected_cores,
            mismatch_reported: false,
        }
    }

    pub fn expected_cores(&self) -> usize {
        self.expected_cores
    }

    /// Fails when the OS counters cannot be read; there is no meaningful
    /// fallback value for CPU usage.
    pub fn sample(&mut self) -> Result<UsageSample> {
        let _sample_span = tracing::trace_span!("sampler.sample").entered();

        let usage = self
            .source
            .usage()
            .wrap_err("failed to read CPU usage counters")?;
        if usage.per_core.is_empty() {
            return Err(eyre!("the OS reported no per-core CPU counters"));
        }

        if usage.per_core.len() != self.expected_cores && !self.mismatch_reported {
            tracing::warn!(
                expected = self.expected_cores,
                reported = usage.per_core.len(),
                "logical processor count changed since startup"
            );
            self.mismatch_reported = true;
        }

        Ok(UsageSample {
            total_percent: clamp_percent(usage.total),
            core_percents: usage.per_core.into_iter().map(clamp_percent).collect(),
        })
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
