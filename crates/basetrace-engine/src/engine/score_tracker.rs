use crate::core::{ScoreState, Team};

/// Credits `runs_scored` to the batting team; the fielding team's total is carried unchanged.
#[must_use]
pub fn apply_runs(pre: ScoreState, runs_scored: u32, batting_team: Team) -> ScoreState {
    match batting_team {
        Team::Away => ScoreState {
            away: pre.away + runs_scored,
            ..pre
        },
        Team::Home => ScoreState {
            home: pre.home + runs_scored,
            ..pre
        },
    }
}
