use std::fs::{self, OpenOptions};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is logged unless a file is given.
pub fn init_file_logging(output_path: &Path, json: bool) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_path)
        .wrap_err_with(|| format!("failed to open log file {}", output_path.display()))?;
    let make_writer = move || -> Box<dyn std::io::Write> {
        match file.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(std::io::sink()),
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(make_writer);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
