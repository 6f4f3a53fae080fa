use cpuview::format::{format_bytes, format_flags, format_percent};
use cpuview::system::collector::normalize_flags;
use proptest::prelude::*;

proptest! {
    #[test]
    fn small_sizes_stay_in_bytes(n in 1u64..1024) {
        prop_assert_eq!(format_bytes(Some(n)), format!("{} B", n));
    }

    #[test]
    fn exact_kilobytes_render_whole(k in 1u64..1024) {
        prop_assert_eq!(format_bytes(Some(k * 1024)), format!("{} KB", k));
    }

    #[test]
    fn sizes_always_carry_a_unit(n in 1u64..u64::MAX) {
        let rendered = format_bytes(Some(n));
        let unit = rendered.rsplit(' ').next().unwrap_or_default();
        prop_assert!(["B", "KB", "MB", "GB", "TB"].contains(&unit), "{}", rendered);
    }

    #[test]
    fn percent_is_right_aligned_in_four_columns(p in 0.0f32..=100.0) {
        let rendered = format_percent(p);
        prop_assert!(rendered.len() == 4 || rendered == "100%");
        prop_assert!(rendered.ends_with('%'));
    }

    #[test]
    fn normalized_flags_have_no_duplicates(
        flags in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..40),
    ) {
        let normalized = normalize_flags(flags.clone());
        let mut sorted = normalized.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), normalized.len());
        prop_assert!(normalized.iter().all(|f| *f == f.to_lowercase()));

        let line = format_flags(&normalized);
        prop_assert_eq!(line.split(", ").filter(|s| !s.is_empty()).count(), normalized.len());
    }
}

#[test]
fn absent_and_zero_sizes_are_not_available() {
    assert_eq!(format_bytes(None), "N/A");
    assert_eq!(format_bytes(Some(0)), "N/A");
}
