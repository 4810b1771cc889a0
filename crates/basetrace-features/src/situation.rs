//! Situational features derived from the state before a sub-event.
//!
//! All groups look at the pre-event state only, from the batting team's perspective:
//!
//! - [`RunnerStatus`] - Which bases are occupied (8 combinations)
//! - [`ScoreDifference`] - Batting team's lead or deficit, clamped to ±3
//! - [`InningPhase`] - Early (1-3), middle (4-6) or late (7+)
//! - `is_goahead_runner_on_base` - The batting team trails and the runners already on base
//!   outnumber the deficit

use basetrace_engine::BaseState;
use serde::{Deserialize, Serialize};

use crate::FeatureGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunnerStatus {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "first")]
    First,
    #[serde(rename = "second")]
    Second,
    #[serde(rename = "third")]
    Third,
    #[serde(rename = "first-second")]
    FirstSecond,
    #[serde(rename = "first-third")]
    FirstThird,
    #[serde(rename = "second-third")]
    SecondThird,
    #[serde(rename = "first-second-third")]
    Loaded,
}

impl RunnerStatus {
    /// Status from occupancy flags of first, second and third base.
    #[must_use]
    pub const fn from_occupancy(occupancy: [bool; 3]) -> Self {
        match occupancy {
            [false, false, false] => Self::None,
            [true, false, false] => Self::First,
            [false, true, false] => Self::Second,
            [false, false, true] => Self::Third,
            [true, true, false] => Self::FirstSecond,
            [true, false, true] => Self::FirstThird,
            [false, true, true] => Self::SecondThird,
            [true, true, true] => Self::Loaded,
        }
    }
}

impl FeatureGroup for RunnerStatus {
    const GROUP: &'static str = "runner_status";
    const VALUES: &'static [Self] = &[
        Self::None,
        Self::First,
        Self::Second,
        Self::Third,
        Self::FirstSecond,
        Self::FirstThird,
        Self::SecondThird,
        Self::Loaded,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::FirstSecond => "first-second",
            Self::FirstThird => "first-third",
            Self::SecondThird => "second-third",
            Self::Loaded => "first-second-third",
        }
    }
}

/// Batting team's score minus the fielding team's score, clamped to ±3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreDifference {
    #[serde(rename = "minus_3_or_more")]
    MinusThreeOrMore,
    #[serde(rename = "minus_2")]
    MinusTwo,
    #[serde(rename = "minus_1")]
    MinusOne,
    #[serde(rename = "tie")]
    Tie,
    #[serde(rename = "plus_1")]
    PlusOne,
    #[serde(rename = "plus_2")]
    PlusTwo,
    #[serde(rename = "plus_3_or_more")]
    PlusThreeOrMore,
}

impl ScoreDifference {
    #[must_use]
    pub const fn from_differential(differential: i64) -> Self {
        match differential {
            ..=-3 => Self::MinusThreeOrMore,
            -2 => Self::MinusTwo,
            -1 => Self::MinusOne,
            0 => Self::Tie,
            1 => Self::PlusOne,
            2 => Self::PlusTwo,
            3.. => Self::PlusThreeOrMore,
        }
    }
}

impl FeatureGroup for ScoreDifference {
    const GROUP: &'static str = "score_difference";
    const VALUES: &'static [Self] = &[
        Self::MinusThreeOrMore,
        Self::MinusTwo,
        Self::MinusOne,
        Self::Tie,
        Self::PlusOne,
        Self::PlusTwo,
        Self::PlusThreeOrMore,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::MinusThreeOrMore => "minus_3_or_more",
            Self::MinusTwo => "minus_2",
            Self::MinusOne => "minus_1",
            Self::Tie => "tie",
            Self::PlusOne => "plus_1",
            Self::PlusTwo => "plus_2",
            Self::PlusThreeOrMore => "plus_3_or_more",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningPhase {
    Early,
    Middle,
    Late,
}

impl InningPhase {
    /// Innings 1-3 are early, 4-6 middle, 7 and beyond (extra innings included) late.
    #[must_use]
    pub const fn from_inning(inning: u8) -> Self {
        match inning {
            ..=3 => Self::Early,
            4..=6 => Self::Middle,
            7.. => Self::Late,
        }
    }
}

impl FeatureGroup for InningPhase {
    const GROUP: &'static str = "inning_phase";
    const VALUES: &'static [Self] = &[Self::Early, Self::Middle, Self::Late];

    fn label(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Middle => "middle",
            Self::Late => "late",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SituationFeatures {
    pub runner_status: RunnerStatus,
    pub score_difference: ScoreDifference,
    pub inning_phase: InningPhase,
    pub is_goahead_runner_on_base: bool,
}

impl SituationFeatures {
    /// Derives the situation from the pre-event bases, the batting team's pre-event score
    /// differential, and the inning.
    #[must_use]
    pub fn derive(bases: &BaseState, score_differential: i64, inning: u8) -> Self {
        let deficit = -score_differential;
        let is_goahead_runner_on_base =
            deficit > 0 && i64::from(bases.runner_count()) > deficit;
        Self {
            runner_status: RunnerStatus::from_occupancy(bases.occupancy()),
            score_difference: ScoreDifference::from_differential(score_differential),
            inning_phase: InningPhase::from_inning(inning),
            is_goahead_runner_on_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use basetrace_engine::{Base, Player};

    use super::*;

    fn count_set(flags: &[(&str, bool)]) -> usize {
        flags.iter().filter(|(_, f)| *f).count()
    }

    fn bases(occupied: [bool; 3]) -> BaseState {
        let mut state = BaseState::EMPTY;
        for (id, (base, is_occupied)) in (1..).zip(Base::ALL.into_iter().zip(occupied)) {
            if is_occupied {
                state = state.with_runner(base, Player::new(id, format!("Runner {id}")));
            }
        }
        state
    }

    #[test]
    fn test_runner_status_exactly_one_for_every_occupancy() {
        let mut seen = vec![];
        for mask in 0..8_u8 {
            let occupancy = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0];
            let status = RunnerStatus::from_occupancy(occupancy);
            assert_eq!(count_set(&RunnerStatus::one_hot(Some(status))), 1);
            seen.push(status);
        }
        seen.sort_by_key(|s| s.label());
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_runner_status_labels() {
        assert_eq!(
            RunnerStatus::from_occupancy([true, false, true]).label(),
            "first-third"
        );
        assert_eq!(RunnerStatus::from_occupancy([true; 3]), RunnerStatus::Loaded);
        assert_eq!(RunnerStatus::from_occupancy([false; 3]), RunnerStatus::None);
    }

    #[test]
    fn test_score_difference_clamps() {
        assert_eq!(
            ScoreDifference::from_differential(-9),
            ScoreDifference::MinusThreeOrMore
        );
        assert_eq!(
            ScoreDifference::from_differential(-3),
            ScoreDifference::MinusThreeOrMore
        );
        assert_eq!(ScoreDifference::from_differential(0), ScoreDifference::Tie);
        assert_eq!(
            ScoreDifference::from_differential(3),
            ScoreDifference::PlusThreeOrMore
        );
        for diff in -6..=6 {
            let flags = ScoreDifference::one_hot(Some(ScoreDifference::from_differential(diff)));
            assert_eq!(count_set(&flags), 1);
        }
    }

    #[test]
    fn test_inning_phase_boundaries() {
        let phases = (1..=12)
            .map(InningPhase::from_inning)
            .collect::<Vec<_>>();
        assert_eq!(&phases[0..3], &[InningPhase::Early; 3]);
        assert_eq!(&phases[3..6], &[InningPhase::Middle; 3]);
        assert!(phases[6..].iter().all(|p| *p == InningPhase::Late));
    }

    #[test]
    fn test_goahead_runner_requires_more_runners_than_deficit() {
        // trailing by 1 with two on
        let s = SituationFeatures::derive(&bases([true, true, false]), -1, 8);
        assert!(s.is_goahead_runner_on_base);

        // trailing by 2 with two on only ties
        let s = SituationFeatures::derive(&bases([true, true, false]), -2, 8);
        assert!(!s.is_goahead_runner_on_base);

        // leading never qualifies
        let s = SituationFeatures::derive(&bases([true, true, true]), 1, 8);
        assert!(!s.is_goahead_runner_on_base);

        // tied never qualifies
        let s = SituationFeatures::derive(&bases([true, false, false]), 0, 8);
        assert!(!s.is_goahead_runner_on_base);
    }

    #[test]
    fn test_serialized_names_match_labels() {
        for &status in RunnerStatus::VALUES {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::from(status.label()));
        }
        for &diff in ScoreDifference::VALUES {
            let json = serde_json::to_value(diff).unwrap();
            assert_eq!(json, serde_json::Value::from(diff.label()));
        }
        for &phase in InningPhase::VALUES {
            let json = serde_json::to_value(phase).unwrap();
            assert_eq!(json, serde_json::Value::from(phase.label()));
        }
    }

    #[test]
    fn test_derive_groups() {
        let s = SituationFeatures::derive(&bases([false, true, true]), -2, 4);
        assert_eq!(s.runner_status, RunnerStatus::SecondThird);
        assert_eq!(s.score_difference, ScoreDifference::MinusTwo);
        assert_eq!(s.inning_phase, InningPhase::Middle);
        assert!(!s.is_goahead_runner_on_base);
    }
}
