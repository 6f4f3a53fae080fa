use std::fmt::Write;

use serde::Serialize;

use crate::format::{format_bytes, format_flags, format_mhz, format_percent, or_not_available};

const LABEL_WIDTH: usize = 25;
const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheSizes {
    pub l1_data: Option<u64>,
    pub l1_instruction: Option<u64>,
    pub l2: Option<u64>,
    pub l3: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrequencyRange {
    pub max_mhz: f64,
    pub min_mhz: f64,
}

/// Static description of the host CPU, captured once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuReport {
    pub brand: String,
    pub architecture: String,
    pub bits: Option<u32>,
    /// Not reconciled against `logical_processors`; the two come from
    /// independent queries and may disagree.
    pub physical_cores: Option<usize>,
    pub logical_processors: usize,
    pub frequency: FrequencyRange,
    pub caches: CacheSizes,
    /// Lowercase, deduplicated, in the order the OS listed them.
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Identity,
    Topology,
    Frequency,
    Cache,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub section: Section,
}

impl CpuReport {
    pub fn bits_label(&self) -> String {
        match self.bits {
            Some(bits) => format!("{bits}-bit"),
            None => or_not_available::<u32>(None),
        }
    }

    pub fn flags_line(&self) -> String {
        format_flags(&self.flags)
    }

    /// Display-ready fields in presentation order, flags excluded.
    pub fn fields(&self) -> Vec<ReportField> {
        let field = |key, label, value: String, section| ReportField {
            key,
            label,
            value,
            section,
        };

        vec![
            field("brand", "Processor:", self.brand.clone(), Section::Identity),
            field(
                "architecture",
                "Architecture:",
                self.architecture.clone(),
                Section::Identity,
            ),
            field("bits", "Bits:", self.bits_label(), Section::Identity),
            field(
                "physical_cores",
                "Physical Cores:",
                or_not_available(self.physical_cores),
                Section::Topology,
            ),
            field(
                "logical_processors",
                "Logical Processors:",
                self.logical_processors.to_string(),
                Section::Topology,
            ),
            field(
                "max_freq",
                "Max Frequency:",
                format_mhz(self.frequency.max_mhz),
                Section::Frequency,
            ),
            field(
                "min_freq",
                "Min Frequency:",
                format_mhz(self.frequency.min_mhz),
                Section::Frequency,
            ),
            field(
                "l1_data_cache_size",
                "L1 Data Cache Size:",
                format_bytes(self.caches.l1_data),
                Section::Cache,
            ),
            field(
                "l1_instruction_cache_size",
                "L1 Instruction Cache Size:",
                format_bytes(self.caches.l1_instruction),
                Section::Cache,
            ),
            field(
                "l2_cache_size",
                "L2 Cache Size:",
                format_bytes(self.caches.l2),
                Section::Cache,
            ),
            field(
                "l3_cache_size",
                "L3 Cache Size:",
                format_bytes(self.caches.l3),
                Section::Cache,
            ),
        ]
    }

    /// Flat field-name to display-value mapping, flags included.
    pub fn display_map(&self) -> Vec<(&'static str, String)> {
        let mut out: Vec<(&'static str, String)> = self
            .fields()
            .into_iter()
            .map(|f| (f.key, f.value))
            .collect();
        out.push(("flags", self.flags_line()));
        out
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<Section> = None;

        for field in self.fields() {
            if previous.is_some_and(|s| s != field.section) {
                push_separator(&mut out);
            }
            previous = Some(field.section);
            let _ = writeln!(
                out,
                "{:<width$} {}",
                field.label,
                field.value,
                width = LABEL_WIDTH
            );
        }
        push_separator(&mut out);

        let _ = writeln!(out, "Instruction Sets (Flags):");
        let _ = writeln!(out, "{}", self.flags_line());
        out
    }
}

fn push_separator(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    let _ = writeln!(out);
}

/// One utilization reading. Per-core entries follow OS enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSample {
    pub total_percent: f32,
    pub core_percents: Vec<f32>,
}

impl UsageSample {
    pub fn core_count(&self) -> usize {
        self.core_percents.len()
    }

    /// `Total:  38%  |  Core 1:  10%  |  Core 2: ...` on one line.
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.core_percents.len() + 1);
        parts.push(format!("Total: {}", format_percent(self.total_percent)));
        parts.extend(
            self.core_percents
                .iter()
                .enumerate()
                .map(|(i, p)| format!("Core {}: {}", i + 1, format_percent(*p))),
        );
        parts.join("  |  ")
    }
}

#[cfg(test)]
pub(crate) fn sample_report() -> CpuReport {
    CpuReport {
        brand: "AMD Ryzen 7 7840U w/ Radeon 780M Graphics".to_string(),
        architecture: "x86_64".to_string(),
        bits: Some(64),
        physical_cores: Some(8),
        logical_processors: 16,
        frequency: FrequencyRange {
            max_mhz: 5132.0,
            min_mhz: 400.0,
        },
        caches: CacheSizes {
            l1_data: Some(32 * 1024),
            l1_instruction: Some(32 * 1024),
            l2: Some(1024 * 1024),
            l3: Some(16 * 1024 * 1024),
        },
        flags: vec!["sse2".to_string(), "avx".to_string(), "avx2".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_follow_presentation_order() {
        let report = sample_report();
        let keys: Vec<&str> = report.fields().iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "brand",
                "architecture",
                "bits",
                "physical_cores",
                "logical_processors",
                "max_freq",
                "min_freq",
                "l1_data_cache_size",
                "l1_instruction_cache_size",
                "l2_cache_size",
                "l3_cache_size",
            ]
        );
    }

    #[test]
    fn display_map_normalizes_values() {
        let report = sample_report();
        let map = report.display_map();
        let get = |key: &str| {
            map.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("bits"), "64-bit");
        assert_eq!(get("l1_data_cache_size"), "32 KB");
        assert_eq!(get("l2_cache_size"), "1 MB");
        assert_eq!(get("l3_cache_size"), "16 MB");
        assert_eq!(get("max_freq"), "5132.00 MHz");
        assert_eq!(get("flags"), "SSE2, AVX, AVX2");
    }

    #[test]
    fn missing_values_render_placeholders() {
        let mut report = sample_report();
        report.bits = None;
        report.physical_cores = None;
        report.caches = CacheSizes::default();
        report.flags.clear();

        let map = report.display_map();
        for key in ["bits", "physical_cores", "l1_data_cache_size", "l3_cache_size"] {
            let value = &map.iter().find(|(k, _)| *k == key).unwrap().1;
            assert_eq!(value, "N/A", "{key}");
        }
        assert_eq!(map.last().unwrap(), &("flags", String::new()));
    }

    #[test]
    fn text_separates_sections() {
        let text = sample_report().render_text();
        let separators = text.lines().filter(|l| l.starts_with("----")).count();
        assert_eq!(separators, 4);
        assert!(text.contains("Processor:                AMD Ryzen 7"));
        assert!(text.ends_with("Instruction Sets (Flags):\nSSE2, AVX, AVX2\n"));
    }

    #[test]
    fn summary_line_lists_every_core() {
        let sample = UsageSample {
            total_percent: 37.5,
            core_percents: vec![10.0, 60.0],
        };
        assert_eq!(
            sample.summary_line(),
            "Total:  38%  |  Core 1:  10%  |  Core 2:  60%"
        );
    }
}
