use std::io;
use std::mem::size_of;

use windows_sys::Win32::System::SystemInformation::{
    CacheData, CacheInstruction, GetLogicalProcessorInformation, RelationCache,
    SYSTEM_LOGICAL_PROCESSOR_INFORMATION,
};

use super::PlatformExtensions;
use crate::system::report::{CacheSizes, FrequencyRange};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cache_sizes() -> CacheSizes {
        let mut caches = CacheSizes::default();
        let Some(infos) = logical_processor_information() else {
            return caches;
        };

        for info in &infos {
            if info.Relationship != RelationCache {
                continue;
            }
            let cache = unsafe { info.Anonymous.Cache };
            let size = Some(cache.Size as u64);
            let slot = match cache.Level {
                1 if cache.Type == CacheData => &mut caches.l1_data,
                1 if cache.Type == CacheInstruction => &mut caches.l1_instruction,
                2 => &mut caches.l2,
                3 => &mut caches.l3,
                _ => continue,
            };
            if slot.is_none() {
                *slot = size;
            }
        }
        caches
    }

    fn frequency_range() -> io::Result<FrequencyRange> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "cpu frequency range not available on windows",
        ))
    }

    fn instruction_flags() -> Vec<String> {
        super::detected_flags()
    }
}

fn logical_processor_information() -> Option<Vec<SYSTEM_LOGICAL_PROCESSOR_INFORMATION>> {
    let entry_size = size_of::<SYSTEM_LOGICAL_PROCESSOR_INFORMATION>();
    let mut len: u32 = 0;
    // First call only reports the required buffer length
    unsafe { GetLogicalProcessorInformation(std::ptr::null_mut(), &mut len) };
    if len == 0 {
        return None;
    }

    let capacity = (len as usize).div_ceil(entry_size);
    let mut buffer: Vec<SYSTEM_LOGICAL_PROCESSOR_INFORMATION> = Vec::with_capacity(capacity);
    let ok = unsafe { GetLogicalProcessorInformation(buffer.as_mut_ptr(), &mut len) };
    if ok == 0 {
        return None;
    }
    unsafe { buffer.set_len((len as usize / entry_size).min(capacity)) };
    Some(buffer)
}
