use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use energy_dialog::config::Config;
use energy_dialog::context::HostContext;
use energy_dialog::energy::{PreferencesStore, StatisticMetadata};
use energy_dialog::logging::init_tracing;
use energy_dialog::ui::app::App;
use energy_dialog::ui::picker::PickerFilter;
use energy_dialog::ui::runtime;

/// Track device energy consumption from the terminal.
#[derive(Debug, Parser)]
#[command(name = "energy-dialog", version, about)]
struct Cli {
    /// Config file (default: ~/.config/energy-dialog/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Energy preferences JSON file, overrides the config
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Statistics catalog JSON file, overrides the config
    #[arg(long)]
    statistics: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the statistics of configured devices and exit
    Devices {
        /// Print as JSON instead of one id per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let preferences_path = cli
        .preferences
        .clone()
        .unwrap_or_else(|| config.energy.preferences_path());
    let store = PreferencesStore::open(&preferences_path)
        .context("opening energy preferences")?;

    if let Some(Command::Devices { json }) = cli.command {
        let prefs = store.get();
        if json {
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        } else {
            for device in prefs.device_consumption {
                println!("{}", device.stat_consumption);
            }
        }
        return Ok(());
    }

    let statistics = match cli.statistics.or_else(|| config.energy.statistics_path.clone()) {
        Some(path) => StatisticMetadata::load_catalog(&path).context("loading statistics")?,
        None => Vec::new(),
    };
    tracing::info!(
        statistics = statistics.len(),
        preferences = %preferences_path.display(),
        "Starting energy dialog"
    );

    let context = HostContext::new(config.translations.clone(), statistics);
    let filter = PickerFilter::new(config.energy.units.clone(), config.energy.entities_only);
    let app = App::new(context, store, filter);

    let tokio_runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime::run(app, config.ui.tick_rate(), tokio_runtime.handle().clone())?;
    Ok(())
}
