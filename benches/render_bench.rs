use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cpuview::system::collector::normalize_flags;
use cpuview::system::report::{CacheSizes, CpuReport, FrequencyRange, UsageSample};
use cpuview::ui::specs::spec_lines;
use cpuview::ui::theme::{ColorSupport, Theme, UsageOverrides};
use cpuview::ui::usage::{self, UsageSlots};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::hint::black_box;

fn make_report() -> CpuReport {
    CpuReport {
        brand: "AMD EPYC 9654 96-Core Processor".to_string(),
        architecture: "x86_64".to_string(),
        bits: Some(64),
        physical_cores: Some(96),
        logical_processors: 192,
        frequency: FrequencyRange {
            max_mhz: 3707.8,
            min_mhz: 1500.0,
        },
        caches: CacheSizes {
            l1_data: Some(32 * 1024),
            l1_instruction: Some(32 * 1024),
            l2: Some(1024 * 1024),
            l3: Some(384 * 1024 * 1024),
        },
        flags: make_flags(120),
    }
}

fn make_flags(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("FLAG_{i}")).collect()
}

fn make_sample(cores: usize) -> UsageSample {
    UsageSample {
        total_percent: 42.0,
        core_percents: (0..cores).map(|i| (i * 7 % 101) as f32).collect(),
    }
}

fn make_theme() -> Theme {
    let usage = UsageOverrides {
        low: "#10b981".to_string(),
        mid: "#f97316".to_string(),
        high: "#ef4444".to_string(),
    };
    Theme::from_config("dark", &usage, ColorSupport::Truecolor)
}

fn bench_report_text(c: &mut Criterion) {
    let report = make_report();
    let theme = make_theme();
    c.bench_function("report_render_text", |b| {
        b.iter(|| black_box(black_box(&report).render_text()))
    });
    c.bench_function("report_spec_lines", |b| {
        b.iter(|| black_box(spec_lines(black_box(&report), &theme)))
    });
}

fn bench_normalize_flags(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_flags_50_150_400");

    for size in [50usize, 150, 400] {
        let mut flags = make_flags(size);
        flags.extend(make_flags(size / 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), &flags, |b, flags| {
            b.iter(|| black_box(normalize_flags(black_box(flags.clone()))))
        });
    }

    group.finish();
}

fn bench_usage_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("usage_render_8_64_192");
    let theme = make_theme();

    for cores in [8usize, 64, 192] {
        let mut slots = UsageSlots::new(cores);
        slots.apply(&make_sample(cores));

        group.bench_with_input(BenchmarkId::from_parameter(cores), &slots, |b, slots| {
            b.iter(|| {
                let backend = TestBackend::new(160, 50);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| {
                        usage::render(
                            frame,
                            Rect::new(0, 0, 160, 50),
                            black_box(slots),
                            2,
                            &theme,
                        );
                    })
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_report_text,
    bench_normalize_flags,
    bench_usage_render
);
criterion_main!(benches);
