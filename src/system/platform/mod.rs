use std::io;

use crate::system::report::{CacheSizes, FrequencyRange};

pub trait PlatformExtensions {
    fn cache_sizes() -> CacheSizes;
    fn frequency_range() -> io::Result<FrequencyRange>;
    fn instruction_flags() -> Vec<String>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cache_sizes() -> CacheSizes {
    platform_impl::Platform::cache_sizes()
}

pub fn frequency_range() -> io::Result<FrequencyRange> {
    platform_impl::Platform::frequency_range()
}

pub fn instruction_flags() -> Vec<String> {
    platform_impl::Platform::instruction_flags()
}

/// Flags the running CPU advertises to the std feature detector, named the
/// way `/proc/cpuinfo` names them.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) fn detected_flags() -> Vec<String> {
    macro_rules! detect {
        ($($feature:tt => $name:literal),* $(,)?) => {{
            let mut flags = Vec::new();
            $(
                if std::arch::is_x86_feature_detected!($feature) {
                    flags.push($name.to_string());
                }
            )*
            flags
        }};
    }

    detect! {
        "sse" => "sse",
        "sse2" => "sse2",
        "sse3" => "pni",
        "ssse3" => "ssse3",
        "sse4.1" => "sse4_1",
        "sse4.2" => "sse4_2",
        "popcnt" => "popcnt",
        "aes" => "aes",
        "pclmulqdq" => "pclmulqdq",
        "rdrand" => "rdrand",
        "rdseed" => "rdseed",
        "avx" => "avx",
        "avx2" => "avx2",
        "fma" => "fma",
        "f16c" => "f16c",
        "bmi1" => "bmi1",
        "bmi2" => "bmi2",
        "lzcnt" => "abm",
        "adx" => "adx",
        "sha" => "sha_ni",
        "xsave" => "xsave",
        "avx512f" => "avx512f",
        "avx512bw" => "avx512bw",
        "avx512vl" => "avx512vl",
    }
}

#[cfg(target_arch = "aarch64")]
pub(crate) fn detected_flags() -> Vec<String> {
    macro_rules! detect {
        ($($feature:tt => $name:literal),* $(,)?) => {{
            let mut flags = Vec::new();
            $(
                if std::arch::is_aarch64_feature_detected!($feature) {
                    flags.push($name.to_string());
                }
            )*
            flags
        }};
    }

    detect! {
        "neon" => "asimd",
        "aes" => "aes",
        "sha2" => "sha2",
        "crc" => "crc32",
        "lse" => "atomics",
        "fp16" => "fphp",
        "rdm" => "asimdrdm",
        "dotprod" => "asimddp",
        "sve" => "sve",
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn detected_flags() -> Vec<String> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_do_not_panic_on_host() {
        let _ = cache_sizes();
        let _ = frequency_range();
        let _ = instruction_flags();
    }

    #[test]
    fn detected_flags_are_lowercase() {
        for flag in detected_flags() {
            assert_eq!(flag, flag.to_lowercase());
        }
    }
}
