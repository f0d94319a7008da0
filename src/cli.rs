// src/cli.rs
//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::literal::BoundaryMode;
use crate::translator::{Strategy, TranslatorOptions};

#[derive(Parser, Debug)]
#[command(name = "month-translate")]
#[command(about = "Replace English month names with their Arabic names, whole words only")]
#[command(version)]
pub struct Cli {
    /// Files to translate
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suffix appended to the file stem of derived output names
    #[arg(long, default_value = "ar")]
    pub suffix: String,

    /// JSON object of "source": "target" pairs, used instead of the month table
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// How rules are applied
    #[arg(long, value_enum, default_value = "sequential")]
    pub strategy: StrategyArg,

    /// Which characters count as word characters
    #[arg(long, value_enum, default_value = "ascii")]
    pub boundary: BoundaryArg,

    /// Fail if table entries interfere with each other
    #[arg(long)]
    pub strict: bool,

    /// Worker threads when several inputs are given
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Sequential,
    SinglePass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoundaryArg {
    Ascii,
    Unicode,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::SinglePass => Strategy::SinglePass,
        }
    }
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Ascii => BoundaryMode::Ascii,
            BoundaryArg::Unicode => BoundaryMode::Unicode,
        }
    }
}

impl Cli {
    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions::default()
            .strategy(self.strategy.into())
            .boundary(self.boundary.into())
            .strict(self.strict)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
