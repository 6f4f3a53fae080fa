use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use cpuview::app::App;
use cpuview::config::{Config, load_config, load_config_from_path};
use cpuview::event::{Event, EventHandler, sample_ticks};
use cpuview::logging::init_file_logging;
use cpuview::system::collector::collect;
use cpuview::system::report::CpuReport;
use cpuview::system::sampler::UsageSampler;
use cpuview::system::source::SystemProbe;
use cpuview::ui;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "cpuview",
    about = "Terminal CPU inspector: hardware specifications and live per-core usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Theme: dark, light, vivid, mono
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Tab shown at startup: specs, usage
    #[arg(long)]
    tab: Option<String>,

    /// Print the specifications report and exit.
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Print this many usage samples, one per interval, and exit.
    #[arg(long)]
    samples: Option<usize>,

    /// Emit headless output as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a CpuReport,
    display: BTreeMap<&'static str, String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if cli.samples == Some(0) {
        return Err(eyre!("--samples must be greater than 0"));
    }
    let config = load_config_for_cli(&cli);

    if let Some(path) = config.log_file() {
        init_file_logging(&path, cli.log_json)?;
    }

    let probe = SystemProbe::new();
    let report = collect(&probe, &probe);
    tracing::info!(
        brand = %report.brand,
        architecture = %report.architecture,
        logical = report.logical_processors,
        physical = ?report.physical_cores,
        "collected CPU report"
    );
    let sampler = UsageSampler::new(Box::new(probe), report.logical_processors);

    if cli.report {
        return print_report(&report, cli.json);
    }
    if let Some(count) = cli.samples {
        return print_samples(sampler, count, &config, cli.json).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config, report, sampler).await;

    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: &Config,
    report: CpuReport,
    sampler: UsageSampler,
) -> Result<()> {
    let sample_period = Duration::from_millis(config.general.refresh_rate_ms);
    let mut app = App::new(config, report, sampler);
    let mut events = EventHandler::new(sample_period);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Sample => {
                    if !app.sampling_halted() {
                        app.on_tick();
                        should_draw = true;
                    }
                }
                Event::Resize => should_draw = true,
            }
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &mut app))?;
            }
        } else {
            break;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }
    if let Some(ref tab) = cli.tab {
        config.general.default_tab = tab.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = path.display().to_string();
    }

    config.normalized()
}

fn print_report(report: &CpuReport, json: bool) -> Result<()> {
    if json {
        let payload = JsonReport {
            report,
            display: report.display_map().into_iter().collect(),
        };
        let rendered =
            serde_json::to_string_pretty(&payload).wrap_err("failed to serialize report")?;
        println!("{rendered}");
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

async fn print_samples(
    mut sampler: UsageSampler,
    count: usize,
    config: &Config,
    json: bool,
) -> Result<()> {
    let mut ticks = sample_ticks(Duration::from_millis(config.general.refresh_rate_ms));

    for _ in 0..count {
        ticks.tick().await;
        let sample = sampler.sample()?;
        if json {
            println!(
                "{}",
                serde_json::to_string(&sample).wrap_err("failed to serialize sample")?
            );
        } else {
            println!("{}", sample.summary_line());
        }
    }
    Ok(())
}
