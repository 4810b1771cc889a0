use std::path::PathBuf;

use basetrace_analysis::sample::FeatureRow;
use serde::Serialize;

use crate::{command::OnCorruptPlay, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ExportFeaturesArg {
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
struct GameFeatureRows {
    game_pk: u64,
    rows: Vec<FeatureRow>,
}

pub(crate) fn run(arg: &ExportFeaturesArg) -> anyhow::Result<()> {
    let games = util::read_game_files(&arg.feeds)?;
    let (traces, failures) = util::reconstruct_all(&games, arg.on_corrupt_play.into());

    let exported = traces
        .iter()
        .map(|(game_pk, trace)| GameFeatureRows {
            game_pk: *game_pk,
            rows: FeatureRow::from_trace(trace),
        })
        .collect::<Vec<_>>();
    let num_rows = exported.iter().map(|g| g.rows.len()).sum::<usize>();
    log::info!("exported {num_rows} rows from {} games", exported.len());
    util::Output::save_json(&exported, arg.output.clone())?;

    util::ensure_no_failures(failures, games.len())
}
