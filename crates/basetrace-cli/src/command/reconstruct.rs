use std::path::PathBuf;

use basetrace_analysis::trace::GameTrace;
use serde::Serialize;

use crate::{command::OnCorruptPlay, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReconstructArg {
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

#[derive(Debug, Serialize)]
struct GameTraceOutput {
    game_pk: u64,
    #[serde(flatten)]
    trace: GameTrace,
}

pub(crate) fn run(arg: &ReconstructArg) -> anyhow::Result<()> {
    let ReconstructArg {
        feeds,
        on_corrupt_play,
        output,
    } = arg;

    let games = util::read_game_files(feeds)?;
    let (traces, failures) = util::reconstruct_all(&games, (*on_corrupt_play).into());

    let traces = traces
        .into_iter()
        .map(|(game_pk, trace)| GameTraceOutput { game_pk, trace })
        .collect::<Vec<_>>();
    util::Output::save_json(&traces, output.clone())?;

    util::ensure_no_failures(failures, games.len())
}
