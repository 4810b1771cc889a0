use serde::{Deserialize, Serialize};

use crate::FeatureGroup;

/// What a play's runs batted in did to the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum RbiImpact {
    /// Runs that neither tied the game nor gave the batting team the lead.
    Regular,
    /// Erased the deficit exactly.
    Tie,
    /// Overturned the deficit.
    GoAhead,
    /// Overturned the deficit in the game's final half-inning.
    Walkoff,
}

impl FeatureGroup for RbiImpact {
    const GROUP: &'static str = "rbi_impact";
    const VALUES: &'static [Self] = &[Self::Regular, Self::Tie, Self::GoAhead, Self::Walkoff];

    fn label(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Tie => "tie",
            Self::GoAhead => "go_ahead",
            Self::Walkoff => "walkoff",
        }
    }
}

/// Labels a play's RBI by the batting team's deficit immediately before the play.
///
/// `pre_deficit` is the opponent's score minus the batting team's score, so zero or negative
/// means the batting team was not trailing. Returns `None` when no run was batted in.
#[must_use]
pub fn classify_rbi(rbi: u32, pre_deficit: i64, is_final_half_inning: bool) -> Option<RbiImpact> {
    if rbi == 0 {
        return None;
    }
    let rbi = i64::from(rbi);
    let impact = if pre_deficit <= 0 || rbi < pre_deficit {
        RbiImpact::Regular
    } else if rbi == pre_deficit {
        RbiImpact::Tie
    } else if is_final_half_inning {
        RbiImpact::Walkoff
    } else {
        RbiImpact::GoAhead
    };
    Some(impact)
}
