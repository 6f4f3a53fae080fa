use std::fs;
use std::path::{Path, PathBuf};

fn crate_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

/// Every `.rs` file under `dir`, as (crate-relative path, contents).
fn sources(dir: &str) -> Vec<(String, String)> {
    let root = crate_path("");
    let mut out = Vec::new();
    let mut stack = vec![crate_path(dir)];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                let rel = path
                    .strip_prefix(&root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/");
                out.push((rel, fs::read_to_string(&path).unwrap_or_default()));
            }
        }
    }
    out.sort();
    out
}

fn violations<F>(dir: &str, needles: &[&str], allowed: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut found = Vec::new();
    for (path, content) in sources(dir) {
        if allowed(&path) {
            continue;
        }
        for needle in needles {
            if content.contains(needle) {
                found.push(format!("{path} mentions `{needle}`"));
            }
        }
    }
    found
}

#[test]
fn system_layer_knows_nothing_about_the_terminal() {
    let found = violations(
        "src/system",
        &["crate::ui", "crate::app", "ratatui", "crossterm"],
        |_| false,
    );
    assert!(found.is_empty(), "System layering violations:\n{}", found.join("\n"));
}

#[test]
fn ui_reaches_hardware_only_through_reports() {
    let found = violations(
        "src/ui",
        &["crate::system::platform", "sysinfo", "SystemProbe"],
        |_| false,
    );
    assert!(found.is_empty(), "UI/platform boundary violations:\n{}", found.join("\n"));
}

#[test]
fn os_crates_are_confined_to_the_probe() {
    let found = violations("src", &["sysinfo::", "libc::", "windows_sys::"], |path| {
        path == "src/system/source.rs" || path.starts_with("src/system/platform/")
    });
    assert!(found.is_empty(), "OS query leaks:\n{}", found.join("\n"));
}

#[test]
fn target_os_cfg_is_scoped_to_system_platform() {
    let found = violations("src", &["target_os"], |path| {
        path.starts_with("src/system/platform/")
    });
    assert!(found.is_empty(), "Unexpected target_os cfg usage:\n{}", found.join("\n"));
}
