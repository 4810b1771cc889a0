use basetrace_analysis::trace::CorruptPlayPolicy;
use clap::{Parser, Subcommand, ValueEnum};

use self::{
    export_features::ExportFeaturesArg, reconstruct::ReconstructArg, summarize::SummarizeArg,
    timeline::TimelineArg,
};

mod export_features;
mod reconstruct;
mod summarize;
mod timeline;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Reconstruct enriched event traces from game feeds
    Reconstruct(#[clap(flatten)] ReconstructArg),
    /// Summarize games for comparison
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Export flat feature rows of informational events
    ExportFeatures(#[clap(flatten)] ExportFeaturesArg),
    /// Slice one game into per-minute feature rows
    Timeline(#[clap(flatten)] TimelineArg),
}

/// Handling of plays that cannot be reconstructed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OnCorruptPlay {
    /// Fail the whole game
    #[default]
    Reject,
    /// Drop the play, clear the bases and continue
    Skip,
}

impl From<OnCorruptPlay> for CorruptPlayPolicy {
    fn from(value: OnCorruptPlay) -> Self {
        match value {
            OnCorruptPlay::Reject => Self::RejectGame,
            OnCorruptPlay::Skip => Self::SkipPlay,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Reconstruct(arg) => reconstruct::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::ExportFeatures(arg) => export_features::run(&arg)?,
        Mode::Timeline(arg) => timeline::run(&arg)?,
    }
    Ok(())
}
