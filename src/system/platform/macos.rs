use std::ffi::CString;
use std::io;

use super::PlatformExtensions;
use crate::system::report::{CacheSizes, FrequencyRange};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cache_sizes() -> CacheSizes {
        CacheSizes {
            l1_data: sysctl_u64("hw.l1dcachesize"),
            l1_instruction: sysctl_u64("hw.l1icachesize"),
            l2: sysctl_u64("hw.l2cachesize"),
            l3: sysctl_u64("hw.l3cachesize"),
        }
    }

    fn frequency_range() -> io::Result<FrequencyRange> {
        // Apple Silicon does not publish these keys
        let max_hz = sysctl_u64("hw.cpufrequency_max").ok_or_else(unsupported)?;
        let min_hz = sysctl_u64("hw.cpufrequency_min").ok_or_else(unsupported)?;
        Ok(FrequencyRange {
            max_mhz: max_hz as f64 / 1_000_000.0,
            min_mhz: min_hz as f64 / 1_000_000.0,
        })
    }

    fn instruction_flags() -> Vec<String> {
        super::detected_flags()
    }
}

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "cpu frequency range not exposed by sysctl",
    )
}

fn sysctl_u64(name: &str) -> Option<u64> {
    let c_name = CString::new(name).ok()?;
    let mut value: u64 = 0;
    let mut size = std::mem::size_of::<u64>();
    // Some keys are 32-bit; the zeroed upper half keeps the value intact on little-endian
    let rc = unsafe {
        libc::sysctlbyname(
            c_name.as_ptr(),
            &mut value as *mut u64 as *mut libc::c_void,
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    if rc == 0 && (size == 4 || size == 8) {
        Some(value)
    } else {
        None
    }
}
