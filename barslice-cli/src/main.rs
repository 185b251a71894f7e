//! barslice CLI: the TUI's actions for scripting.
//!
//! Commands:
//! - `list`: print the `.csv` files in the data directory
//! - `extract`: sample a window from one file and print the rows and the next close
//! - `open`: show the data directory in the OS file manager

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use barslice_core::data::{ensure_data_dir, list_csv_files, open_in_file_manager};
use barslice_core::{
    DirListing, ExtractionSeeds, PredictionTarget, SampleSize, Session, Settings, SETTINGS_FILE,
};

#[derive(Parser)]
#[command(
    name = "barslice",
    about = "barslice CLI, random bar windows and the close that follows"
)]
struct Cli {
    /// Settings file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Data directory. Overrides the settings file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the CSV files in the data directory.
    List,
    /// Extract a random window and print it with the next close.
    Extract {
        /// File name inside the data directory. Defaults to the first file.
        #[arg(long)]
        file: Option<String>,

        /// Fixed number of rows.
        #[arg(long, conflicts_with_all = ["min", "max"])]
        count: Option<usize>,

        /// Lower bound of a random row count.
        #[arg(long, requires = "max")]
        min: Option<usize>,

        /// Upper bound of a random row count.
        #[arg(long, requires = "min")]
        max: Option<usize>,

        /// Which close to report. Defaults to the settings file.
        #[arg(long, value_enum)]
        target: Option<TargetArg>,

        /// Shorthand for `--target next-noon`.
        #[arg(long, default_value_t = false, conflicts_with = "target")]
        noon: bool,

        /// Master seed. Defaults to the settings file, then OS entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// Extraction index to replay (as shown in the TUI).
        #[arg(long, default_value_t = 0)]
        iteration: u64,
    },
    /// Open the data directory in the OS file manager.
    Open,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    /// Close of the bar right after the window.
    NextBar,
    /// Close of the next bar stamped 12:00:00.
    NextNoon,
}

impl From<TargetArg> for PredictionTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::NextBar => PredictionTarget::NextBar,
            TargetArg::NextNoon => PredictionTarget::NextNoon,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => run_list(&settings),
        Commands::Extract {
            file,
            count,
            min,
            max,
            target,
            noon,
            seed,
            iteration,
        } => {
            let size = match (count, min, max) {
                (Some(count), _, _) => SampleSize::Fixed { count },
                (None, Some(min), Some(max)) => SampleSize::Range { min, max },
                _ => settings.sample_size(),
            };
            let target = match (target, noon) {
                (Some(arg), _) => arg.into(),
                (None, true) => PredictionTarget::NextNoon,
                (None, false) => settings.target,
            };
            let seed = seed.or(settings.seed);
            run_extract(&settings, file, size, target, seed, iteration)
        }
        Commands::Open => {
            ensure_data_dir(&settings.data_dir)?;
            open_in_file_manager(&settings.data_dir)?;
            Ok(())
        }
    }
}

fn run_list(settings: &Settings) -> Result<()> {
    ensure_data_dir(&settings.data_dir)?;
    match list_csv_files(&settings.data_dir)? {
        DirListing::Empty => {
            println!("Data folder is empty: {}", settings.data_dir.display());
        }
        DirListing::Files(files) => {
            for f in files {
                println!("{f}");
            }
        }
    }
    Ok(())
}

fn run_extract(
    settings: &Settings,
    file: Option<String>,
    size: SampleSize,
    target: PredictionTarget,
    seed: Option<u64>,
    iteration: u64,
) -> Result<()> {
    let seeds = match seed {
        Some(seed) => ExtractionSeeds::new(seed),
        None => ExtractionSeeds::from_entropy(),
    };
    let master_seed = seeds.master_seed();

    let mut session = Session::new(settings.data_dir.clone(), seeds);
    if session.refresh_files()?.is_empty() {
        bail!("data folder is empty: {}", settings.data_dir.display());
    }
    if let Some(name) = &file {
        if !session.select_file(name) {
            bail!("no file named '{name}' in {}", settings.data_dir.display());
        }
    }
    session.size = size;
    session.target = target;
    debug!(?size, ?target, master_seed, iteration, "extracting");

    let e = session.replay(iteration)?;

    println!("{}", e.rows_text);
    println!();
    println!("{}", e.prediction_text);
    if let Some(drawn) = &e.drawn_count_text {
        println!("{drawn}");
    }
    println!(
        "file {} | rows {}..{} | seed {master_seed} | iteration {iteration}",
        e.file_name,
        e.sample.window.start,
        e.sample.window.end()
    );
    Ok(())
}
