use std::collections::HashSet;

use super::report::{CpuReport, FrequencyRange};
use super::source::{CpuAccounting, HardwareDescriptor};
use crate::format::NOT_AVAILABLE;

/// Builds the static report. Every field degrades on its own; this never fails.
pub fn collect<D, A>(descriptor: &D, accounting: &A) -> CpuReport
where
    D: HardwareDescriptor + ?Sized,
    A: CpuAccounting + ?Sized,
{
    let _collect_span = tracing::debug_span!("collector.collect").entered();

    let brand = descriptor.brand().unwrap_or_else(|| {
        tracing::debug!("cpu brand unavailable");
        NOT_AVAILABLE.to_string()
    });
    let architecture = descriptor.architecture();
    let bits = descriptor
        .bits()
        .or_else(|| architecture.as_deref().and_then(bits_for_arch));

    let frequency = match descriptor.frequency_range() {
        Ok(range) => range,
        Err(err) => {
            tracing::debug!(error = %err, "cpu frequency range unavailable");
            FrequencyRange::default()
        }
    };

    let caches = descriptor.cache_sizes();
    let flags = normalize_flags(descriptor.flags());

    let report = CpuReport {
        brand,
        architecture: architecture.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        bits,
        physical_cores: accounting.physical_cores(),
        logical_processors: accounting.logical_processors(),
        frequency,
        caches,
        flags,
    };

    if let Some(physical) = report.physical_cores
        && physical > report.logical_processors
    {
        tracing::debug!(
            physical,
            logical = report.logical_processors,
            "physical core count exceeds logical processor count"
        );
    }

    report
}

/// Word size implied by a machine/architecture string (`uname -m` style).
pub fn bits_for_arch(arch: &str) -> Option<u32> {
    let arch = arch.trim().to_lowercase();
    match arch.as_str() {
        "x86_64" | "amd64" | "x64" | "aarch64" | "arm64" | "ia64" | "ppc64le" | "s390x" => {
            Some(64)
        }
        "x86" | "i386" | "i486" | "i586" | "i686" => Some(32),
        a if a.ends_with("64") => Some(64),
        a if a.starts_with("arm") || a.ends_with("32") => Some(32),
        _ => None,
    }
}

/// Lowercases, drops blanks and case-insensitive duplicates, keeps first-seen order.
pub fn normalize_flags(flags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(flags.len());
    flags
        .into_iter()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .filter(|f| seen.insert(f.clone()))
        .collect()
}
