use std::io;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use cpuview::system::collector::collect;
use cpuview::system::report::{CacheSizes, FrequencyRange};
use cpuview::system::source::{CpuAccounting, CpuUsage, HardwareDescriptor};

#[derive(Clone)]
struct FakeDescriptor {
    brand: Option<String>,
    architecture: Option<String>,
    caches: CacheSizes,
    frequency: Option<FrequencyRange>,
    flags: Vec<String>,
}

impl FakeDescriptor {
    fn ryzen() -> Self {
        FakeDescriptor {
            brand: Some("AMD Ryzen 7 7840U".to_string()),
            architecture: Some("x86_64".to_string()),
            caches: CacheSizes {
                l1_data: Some(32 * 1024),
                l1_instruction: Some(32 * 1024),
                l2: Some(1024 * 1024),
                l3: Some(16 * 1024 * 1024),
            },
            frequency: Some(FrequencyRange {
                max_mhz: 5132.0,
                min_mhz: 400.0,
            }),
            flags: vec!["SSE2".into(), "avx".into(), "sse2".into(), "avx2".into()],
        }
    }

    fn bare() -> Self {
        FakeDescriptor {
            brand: None,
            architecture: None,
            caches: CacheSizes::default(),
            frequency: None,
            flags: Vec::new(),
        }
    }
}

impl HardwareDescriptor for FakeDescriptor {
    fn brand(&self) -> Option<String> {
        self.brand.clone()
    }

    fn architecture(&self) -> Option<String> {
        self.architecture.clone()
    }

    fn cache_sizes(&self) -> CacheSizes {
        self.caches
    }

    fn frequency_range(&self) -> io::Result<FrequencyRange> {
        self.frequency
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "no cpufreq"))
    }

    fn flags(&self) -> Vec<String> {
        self.flags.clone()
    }
}

struct FakeAccounting {
    physical: Option<usize>,
    logical: usize,
}

impl CpuAccounting for FakeAccounting {
    fn physical_cores(&self) -> Option<usize> {
        self.physical
    }

    fn logical_processors(&self) -> usize {
        self.logical
    }

    fn usage(&mut self) -> Result<CpuUsage> {
        Err(eyre!("not sampled here"))
    }
}

#[test]
fn full_descriptor_produces_complete_report() {
    let report = collect(
        &FakeDescriptor::ryzen(),
        &FakeAccounting {
            physical: Some(8),
            logical: 16,
        },
    );

    assert_eq!(report.brand, "AMD Ryzen 7 7840U");
    assert_eq!(report.architecture, "x86_64");
    assert_eq!(report.bits, Some(64));
    assert_eq!(report.physical_cores, Some(8));
    assert_eq!(report.logical_processors, 16);
    assert_eq!(report.frequency.max_mhz, 5132.0);
    assert_eq!(report.flags, vec!["sse2", "avx", "avx2"]);
    assert_eq!(report.flags_line(), "SSE2, AVX, AVX2");
}

#[test]
fn missing_values_degrade_without_failing() {
    let report = collect(
        &FakeDescriptor::bare(),
        &FakeAccounting {
            physical: None,
            logical: 4,
        },
    );

    assert_eq!(report.brand, "N/A");
    assert_eq!(report.architecture, "N/A");
    assert_eq!(report.bits, None);
    assert_eq!(report.frequency, FrequencyRange::default());
    assert!(report.flags.is_empty());

    let display = report.display_map();
    let value = |key: &str| {
        display
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    };
    assert_eq!(value("bits"), "N/A");
    assert_eq!(value("physical_cores"), "N/A");
    assert_eq!(value("l1_data_cache_size"), "N/A");
    assert_eq!(value("l3_cache_size"), "N/A");
    assert_eq!(value("max_freq"), "0.00 MHz");
    assert_eq!(value("min_freq"), "0.00 MHz");
}

#[test]
fn core_counts_are_reported_as_given() {
    let report = collect(
        &FakeDescriptor::ryzen(),
        &FakeAccounting {
            physical: Some(8),
            logical: 4,
        },
    );
    assert_eq!(report.physical_cores, Some(8));
    assert_eq!(report.logical_processors, 4);
}

#[test]
fn collecting_twice_is_stable() {
    let descriptor = FakeDescriptor::ryzen();
    let accounting = FakeAccounting {
        physical: Some(8),
        logical: 16,
    };
    assert_eq!(
        collect(&descriptor, &accounting),
        collect(&descriptor, &accounting)
    );
}

#[test]
fn arm_word_size_comes_from_architecture() {
    let mut descriptor = FakeDescriptor::ryzen();
    descriptor.architecture = Some("aarch64".to_string());
    let report = collect(
        &descriptor,
        &FakeAccounting {
            physical: None,
            logical: 8,
        },
    );
    assert_eq!(report.bits_label(), "64-bit");
}
