use std::path::PathBuf;

use anyhow::Context;
use basetrace_analysis::{
    timeline::MinuteTimeline,
    trace::{CorruptPlayPolicy, Reconstructor},
};

use crate::{command::OnCorruptPlay, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TimelineArg {
    /// Live game feed JSON file
    feed: PathBuf,
    /// What to do with a play that cannot be reconstructed
    #[arg(long, value_enum, default_value_t)]
    on_corrupt_play: OnCorruptPlay,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TimelineArg) -> anyhow::Result<()> {
    let game = util::read_game_file(&arg.feed)?;
    let policy = CorruptPlayPolicy::from(arg.on_corrupt_play);
    let trace = Reconstructor::new(policy)
        .reconstruct(&game.plays)
        .with_context(|| format!("Failed to reconstruct game {}", game.game_pk))?;

    let timeline = MinuteTimeline::from_trace(game.game_pk, &trace);
    log::info!(
        "game {}: {} minutes, {} occupied",
        game.game_pk,
        timeline.total_duration_minutes,
        timeline.minutes.len()
    );
    util::Output::save_json(&timeline, arg.output.clone())
}
