//! Lucky Draw Console
//!
//! Usage:
//!   lucky-draw settings show              - Print the stored settings
//!   lucky-draw settings set --end 800     - Edit the stored settings
//!   lucky-draw run                        - Live ceremony from the terminal
//!   lucky-draw simulate --seed 7          - Whole ceremony, headless

mod live;
mod render;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use ld_core::{PrizeOrder, SettingsPatch, export_file_name};
use ld_draw::{AutoPresent, CeremonyController};
use ld_stage::{CeremonyTiming, Scene, TimingProfile};
use ld_state::{FileBackend, SettingsStore};

#[derive(Parser)]
#[command(name = "lucky-draw", about = "Lucky draw ceremony console")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the stored draw settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Run a live ceremony driven from the terminal
    Run {
        /// Ceremony pacing
        #[arg(short, long, value_enum, default_value = "normal")]
        timing: TimingArg,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
        /// Wait for `done` instead of timing the suspense automatically
        #[arg(long)]
        manual: bool,
    },
    /// Run a whole ceremony headless and print the winners
    Simulate {
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
        /// Write the winners CSV here (a directory gets the dated file name)
        #[arg(long)]
        csv: Option<PathBuf>,
        #[command(flatten)]
        overrides: RangeArgs,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings as JSON
    Show,
    /// Update the stored settings
    Set {
        #[command(flatten)]
        range: RangeArgs,
        /// Let a ticket win more than once
        #[arg(long)]
        allow_duplicates: Option<bool>,
        /// Count down before every draw after the first
        #[arg(long)]
        countdown: Option<bool>,
        #[arg(long)]
        countdown_seconds: Option<u32>,
        /// Welcome message for the presentation
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(clap::Args, Default)]
struct RangeArgs {
    /// First ticket number
    #[arg(long)]
    start: Option<u32>,
    /// Last ticket number
    #[arg(long)]
    end: Option<u32>,
    /// Number of prizes
    #[arg(long)]
    prizes: Option<u32>,
    /// Prize numbering order
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
}

impl RangeArgs {
    fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            ticket_start: self.start,
            ticket_end: self.end,
            number_of_prizes: self.prizes,
            prize_order: self.order.map(PrizeOrder::from),
            ..SettingsPatch::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Ascending,
    Descending,
}

impl From<OrderArg> for PrizeOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Ascending => PrizeOrder::Ascending,
            OrderArg::Descending => PrizeOrder::Descending,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    Normal,
    Rehearsal,
    Instant,
}

impl From<TimingArg> for TimingProfile {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Normal => TimingProfile::Normal,
            TimingArg::Rehearsal => TimingProfile::Rehearsal,
            TimingArg::Instant => TimingProfile::Instant,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let backend = match &cli.config {
        Some(path) => FileBackend::new(path),
        None => FileBackend::default_location(),
    };
    log::info!("Settings file: {}", backend.path().display());
    let store = SettingsStore::load(backend);

    match cli.command {
        Commands::Settings { action } => run_settings(store, action),
        Commands::Run {
            timing,
            seed,
            manual,
        } => {
            let mode = if manual {
                AutoPresent::Off
            } else {
                AutoPresent::Suspense
            };
            let mut controller =
                CeremonyController::new(store, CeremonyTiming::from_profile(timing.into()))
                    .with_auto_present(mode);
            if let Some(seed) = seed {
                controller.seed(seed);
            }
            live::run(controller)
        }
        Commands::Simulate {
            seed,
            csv,
            overrides,
        } => simulate(store, seed, csv, &overrides),
    }
}

fn run_settings(mut store: SettingsStore, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {}
        SettingsAction::Set {
            range,
            allow_duplicates,
            countdown,
            countdown_seconds,
            message,
        } => {
            let patch = SettingsPatch {
                allow_duplicates,
                enable_countdown: countdown,
                countdown_seconds,
                custom_message: message,
                ..range.to_patch()
            };
            if patch.is_empty() {
                bail!("Nothing to change; see `lucky-draw settings set --help`");
            }
            store.update(&patch).context("Settings rejected")?;
            if store.last_write_failed() {
                eprintln!("Warning: settings could not be saved; they apply to this run only");
            }
        }
    }

    println!("{}", render::settings_json(store.settings())?);
    Ok(())
}

/// Play a full ceremony on instant timing
fn simulate(
    stored: SettingsStore,
    seed: Option<u64>,
    csv: Option<PathBuf>,
    overrides: &RangeArgs,
) -> Result<()> {
    // Overrides apply to this run only
    let mut store = SettingsStore::in_memory();
    store
        .replace(stored.settings().merged(&overrides.to_patch()))
        .context("Invalid simulation settings")?;

    let mut controller = CeremonyController::new(store, CeremonyTiming::instant())
        .with_auto_present(AutoPresent::Phase);
    if let Some(seed) = seed {
        controller.seed(seed);
    }

    let mut now = 0;
    controller.advance(now);
    loop {
        controller.tick(now);
        for event in controller.drain_events() {
            if let Some(line) = render::describe(&event.event) {
                println!("{line}");
            }
        }
        if controller.scene() == Scene::ThankYou {
            break;
        }
        now += 1;
        if !controller.advance(now) {
            // Only a pool that ran dry stalls an instant ceremony
            eprintln!(
                "Ceremony stopped after {} of {} prizes",
                controller.winners().len(),
                controller.draw().settings().number_of_prizes
            );
            break;
        }
    }

    println!();
    println!("{}", render::winners_table(controller.winners()));

    if let Some(path) = csv {
        let path = if path.is_dir() {
            path.join(export_file_name(Local::now().date_naive()))
        } else {
            path
        };
        let text = controller.export_csv().context("Nothing to export")?;
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Winners written to {}", path.display());
    }
    Ok(())
}
