use std::path::PathBuf;

use basetrace_analysis::summary::GameSummary;

use crate::{command::OnCorruptPlay, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Live game feed JSON files
    #[arg(required = true)]
    feeds: Vec<PathBuf>,
    /// What to do with a play that cannot be reconstructed
    #[arg(long, value_enum, default_value_t)]
    on_corrupt_play: OnCorruptPlay,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let games = util::read_game_files(&arg.feeds)?;
    let (traces, failures) = util::reconstruct_all(&games, arg.on_corrupt_play.into());

    let summaries = traces
        .iter()
        .map(|(game_pk, trace)| GameSummary::from_trace(*game_pk, trace))
        .collect::<Vec<_>>();
    for summary in &summaries {
        log::info!(
            "game {}: {:.1} min, {} runs, margin {}, {} lead changes",
            summary.game_pk,
            summary.elapsed_minutes,
            summary.total_runs,
            summary.final_margin,
            summary.lead_changes
        );
    }
    util::Output::save_json(&summaries, arg.output.clone())?;

    util::ensure_no_failures(failures, games.len())
}
