//! OS query seams. The collector and sampler only see these traits, so tests
//! can drive them with fixed readings.

use std::io;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::System;

use super::platform;
use super::report::{CacheSizes, FrequencyRange};

/// Best-effort CPU descriptor lookup. Every field may be missing.
pub trait HardwareDescriptor {
    fn brand(&self) -> Option<String>;
    fn architecture(&self) -> Option<String>;
    /// Word size when the source reports it; `None` lets the collector derive
    /// it from the architecture.
    fn bits(&self) -> Option<u32> {
        None
    }
    fn cache_sizes(&self) -> CacheSizes;
    fn frequency_range(&self) -> io::Result<FrequencyRange>;
    fn flags(&self) -> Vec<String>;
}

/// Raw utilization as reported by the OS, before clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuUsage {
    pub total: f32,
    pub per_core: Vec<f32>,
}

/// Process/CPU accounting: topology counts and busy percentages.
pub trait CpuAccounting {
    fn physical_cores(&self) -> Option<usize>;
    fn logical_processors(&self) -> usize;
    /// Busy percentages accumulated since the previous call.
    fn usage(&mut self) -> Result<CpuUsage>;
}

impl<T: CpuAccounting + ?Sized> CpuAccounting for Box<T> {
    fn physical_cores(&self) -> Option<usize> {
        (**self).physical_cores()
    }

    fn logical_processors(&self) -> usize {
        (**self).logical_processors()
    }

    fn usage(&mut self) -> Result<CpuUsage> {
        (**self).usage()
    }
}

/// Host-backed source: `sysinfo` for identity and accounting, the platform
/// module for caches, frequency range and flags.
pub struct SystemProbe {
    sys: System,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut sys = System::new();
        // Primes the usage counters so the first sample has a baseline.
        sys.refresh_cpu_all();
        SystemProbe { sys }
    }
}

impl HardwareDescriptor for SystemProbe {
    fn brand(&self) -> Option<String> {
        self.sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    fn architecture(&self) -> Option<String> {
        let arch = System::cpu_arch();
        let arch = arch.trim();
        if arch.is_empty() {
            None
        } else {
            Some(arch.to_string())
        }
    }

    fn cache_sizes(&self) -> CacheSizes {
        platform::cache_sizes()
    }

    fn frequency_range(&self) -> io::Result<FrequencyRange> {
        platform::frequency_range()
    }

    fn flags(&self) -> Vec<String> {
        platform::instruction_flags()
    }
}

impl CpuAccounting for SystemProbe {
    fn physical_cores(&self) -> Option<usize> {
        System::physical_core_count()
    }

    fn logical_processors(&self) -> usize {
        let count = self.sys.cpus().len();
        if count > 0 {
            return count;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    fn usage(&mut self) -> Result<CpuUsage> {
        self.sys.refresh_cpu_usage();
        let per_core: Vec<f32> = self.sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect();
        if per_core.is_empty() {
            return Err(eyre!("the OS reported no per-core CPU counters"));
        }
        Ok(CpuUsage {
            total: self.sys.global_cpu_usage(),
            per_core,
        })
    }
}
