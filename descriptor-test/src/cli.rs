use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::config::ExperimentConfig;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "descriptor-test",
    version,
    about = "Correlates fingerprint descriptors of a genetic algorithm search with the raw score"
)]
pub struct Args {
    /// TOML file overriding the default experiment
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ASE JSON database of the search, overrides the configuration file
    #[arg(short, long, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Seed of the random test set, overrides the configuration file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print progress, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Level of the diagnostics on stderr
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Defaults, overridden by the configuration file, overridden by the flags
    pub fn experiment(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}
