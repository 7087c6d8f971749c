use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use wbts::config::ProjectConfig;

mod demo;
mod discover;
mod info;
mod merge_cruises;
mod merge_years;
mod profile;

pub use profile::Profile;

/// wbts-merge - Western Boundary Time Series CTD/LADCP merge tool
#[derive(Parser)]
#[command(name = "wbts-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output profile for trading speed against file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over file size
    Fast,
    /// Balance between speed and file size
    #[default]
    Balanced,
    /// Smallest files, slower writes
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered CTD and LADCP directories and their cruise pairing
    Discover {
        /// Project configuration file
        #[arg(short = 'c', long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Merge the CTD casts and LADCP velocities of every discovered cruise
    MergeCruises {
        /// Project configuration file
        #[arg(short = 'c', long, value_name = "FILE")]
        config: PathBuf,

        /// Merge only these cruises (GC_YYYY_MM); repeatable
        #[arg(long = "cruise", value_name = "ID")]
        cruises: Vec<String>,

        /// Output profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Compression level for ZSTD (1-22, default: profile-dependent)
        #[arg(long, hide = true)]
        compression_level: Option<i32>,
    },

    /// Concatenate all per-cruise files into the multi-year archive
    MergeYears {
        /// Project configuration file
        #[arg(short = 'c', long, value_name = "FILE", conflicts_with = "archive_root")]
        config: Option<PathBuf>,

        /// Archive root holding the Merged directory
        #[arg(long, value_name = "DIR", required_unless_present = "config")]
        archive_root: Option<PathBuf>,

        /// Merge only the first N files (by name)
        #[arg(long, value_name = "N")]
        max_files: Option<usize>,

        /// Output profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "max-compression", value_enum)]
        profile: ProfileArg,

        /// Compression level for ZSTD (1-22, default: profile-dependent)
        #[arg(long, hide = true)]
        compression_level: Option<i32>,
    },

    /// Display dimensions, variables and attributes of a dataset file
    Info {
        /// Input dataset file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate a synthetic cruise tree and configuration for testing
    Demo {
        /// Directory to create the demo project in
        #[arg(value_name = "DIR", default_value = "wbts_demo")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Load the project configuration named on the command line
fn load_project(path: &Path) -> Result<ProjectConfig> {
    ProjectConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Discover { config } => discover::run(&config),
        Commands::MergeCruises {
            config,
            cruises,
            profile,
            compression_level,
        } => merge_cruises::run(
            &config,
            &cruises,
            Profile::from(profile).writer_config(compression_level),
        ),
        Commands::MergeYears {
            config,
            archive_root,
            max_files,
            profile,
            compression_level,
        } => merge_years::run(
            config.as_deref(),
            archive_root.as_deref(),
            max_files,
            Profile::from(profile).writer_config(compression_level),
        ),
        Commands::Info { file } => info::run(file),
        Commands::Demo { output } => demo::run(output),
    }
}
