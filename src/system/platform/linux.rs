use std::fs;
use std::io;
use std::path::Path;

use super::PlatformExtensions;
use crate::system::report::{CacheSizes, FrequencyRange};

const CPU0: &str = "/sys/devices/system/cpu/cpu0";

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cache_sizes() -> CacheSizes {
        // One directory per cache: /sys/devices/system/cpu/cpu0/cache/index{0..N}
        let Ok(entries) = fs::read_dir(Path::new(CPU0).join("cache")) else {
            return CacheSizes::default();
        };

        let mut caches = CacheSizes::default();
        for entry in entries.flatten() {
            let dir = entry.path();
            let is_index = dir
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("index"));
            if !is_index {
                continue;
            }

            let level = read_trimmed(&dir.join("level")).and_then(|s| s.parse::<u8>().ok());
            let kind = read_trimmed(&dir.join("type"));
            let size = read_trimmed(&dir.join("size")).and_then(|s| parse_sysfs_size(&s));
            if let (Some(level), Some(kind)) = (level, kind) {
                record_cache(&mut caches, level, &kind, size);
            }
        }
        caches
    }

    fn frequency_range() -> io::Result<FrequencyRange> {
        let cpufreq = Path::new(CPU0).join("cpufreq");
        let max_khz = read_khz(&cpufreq.join("cpuinfo_max_freq"))?;
        let min_khz = read_khz(&cpufreq.join("cpuinfo_min_freq"))?;
        Ok(FrequencyRange {
            max_mhz: max_khz / 1000.0,
            min_mhz: min_khz / 1000.0,
        })
    }

    fn instruction_flags() -> Vec<String> {
        match fs::read_to_string("/proc/cpuinfo") {
            Ok(contents) => {
                let flags = parse_cpuinfo_flags(&contents);
                if flags.is_empty() {
                    super::detected_flags()
                } else {
                    flags
                }
            }
            Err(_) => super::detected_flags(),
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_khz(path: &Path) -> io::Result<f64> {
    let raw = fs::read_to_string(path)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn record_cache(caches: &mut CacheSizes, level: u8, kind: &str, size: Option<u64>) {
    let slot = match (level, kind) {
        (1, "Data") => &mut caches.l1_data,
        (1, "Instruction") => &mut caches.l1_instruction,
        (2, _) => &mut caches.l2,
        (3, _) => &mut caches.l3,
        _ => return,
    };
    if slot.is_none() {
        *slot = size;
    }
}

/// Parses sysfs cache sizes such as `48K`, `1280K`, `36M`.
fn parse_sysfs_size(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last()? {
        'K' | 'k' => (&raw[..raw.len() - 1], 1024),
        'M' | 'm' => (&raw[..raw.len() - 1], 1024 * 1024),
        'G' | 'g' => (&raw[..raw.len() - 1], 1024 * 1024 * 1024),
        _ => (raw, 1),
    };
    digits.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}

/// First `flags` (x86) or `Features` (ARM) line of `/proc/cpuinfo`.
fn parse_cpuinfo_flags(contents: &str) -> Vec<String> {
    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key == "flags" || key == "Features" {
            return value.split_whitespace().map(str::to_string).collect();
        }
    }
    Vec::new()
}
