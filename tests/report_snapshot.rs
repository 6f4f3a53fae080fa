use cpuview::system::report::{CacheSizes, CpuReport, FrequencyRange, UsageSample};
use insta::{assert_debug_snapshot, assert_snapshot};

fn coffee_lake() -> CpuReport {
    CpuReport {
        brand: "Intel(R) Core(TM) i7-9750H CPU @ 2.60GHz".to_string(),
        architecture: "x86_64".to_string(),
        bits: Some(64),
        physical_cores: Some(6),
        logical_processors: 12,
        frequency: FrequencyRange {
            max_mhz: 4500.0,
            min_mhz: 800.0,
        },
        caches: CacheSizes {
            l1_data: Some(32 * 1024),
            l1_instruction: Some(32 * 1024),
            l2: Some(256 * 1024),
            l3: Some(12 * 1024 * 1024),
        },
        flags: vec![
            "fpu".to_string(),
            "sse2".to_string(),
            "avx2".to_string(),
            "aes".to_string(),
        ],
    }
}

#[test]
fn report_text() {
    let report = coffee_lake();
    assert_snapshot!("report_text", report.render_text());
}

#[test]
fn usage_sample() {
    let sample = UsageSample {
        total_percent: 37.5,
        core_percents: vec![10.0, 60.0, 40.0, 40.0],
    };
    assert_debug_snapshot!("usage_sample", sample);
}

#[test]
fn json_report_carries_raw_fields() {
    let value = serde_json::to_value(coffee_lake()).unwrap();
    assert_eq!(value["logical_processors"], 12);
    assert_eq!(value["caches"]["l2"], 256 * 1024);
    assert_eq!(value["frequency"]["max_mhz"], 4500.0);
    assert_eq!(value["flags"][3], "aes");
}
