use serde::{Deserialize, Serialize};

use crate::{
    EventLocation, MissingField, ReconstructError,
    core::{BaseState, HalfInning, Play, ScoreState, SubEvent},
};

use super::{base_runner::advance, half_inning::is_new_half, score_tracker::apply_runs};

/// A value immediately before and after one sub-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition<T> {
    pub pre: T,
    pub post: T,
}

/// Reconstructed state around a single sub-event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub location: EventLocation,
    /// First sub-event after the batting team changed.
    pub is_half_inning_start: bool,
    pub bases: Transition<BaseState>,
    pub score: Transition<ScoreState>,
    /// Movers that crossed home plate in this sub-event.
    pub runs_scored: u32,
}

/// State carried from one sub-event to the next.
///
/// [`TraceState::step`] never mutates the receiver; it returns the successor state together
/// with the record of the sub-event it consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceState {
    previous_half: Option<HalfInning>,
    bases: BaseState,
    score: ScoreState,
}

impl TraceState {
    /// State before the first pitch: empty bases, no score, no half-inning seen yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous_half: None,
            bases: BaseState::EMPTY,
            score: ScoreState::new(0, 0),
        }
    }

    #[must_use]
    pub fn previous_half(&self) -> Option<HalfInning> {
        self.previous_half
    }

    #[must_use]
    pub fn bases(&self) -> &BaseState {
        &self.bases
    }

    #[must_use]
    pub fn score(&self) -> ScoreState {
        self.score
    }

    /// State after a discarded play of `half`: bases cleared, score kept.
    ///
    /// The occupancy the play would have produced is unknown. Its half-inning still counts as
    /// seen, so the next play of another half starts a new one.
    #[must_use]
    pub fn after_skipped_play(&self, half: HalfInning) -> Self {
        Self {
            previous_half: Some(half),
            bases: BaseState::EMPTY,
            score: self.score,
        }
    }

    /// Consumes one sub-event of `play` and returns the successor state and its record.
    pub fn step(
        &self,
        play: &Play,
        event: &SubEvent,
        location: EventLocation,
    ) -> Result<(Self, StateRecord), ReconstructError> {
        let batter = play
            .batter
            .as_ref()
            .ok_or(ReconstructError::MissingField {
                location,
                field: MissingField::Batter,
            })?;

        let is_half_inning_start = is_new_half(play.half, self.previous_half);
        if is_half_inning_start {
            log::trace!(
                "{location}: half-inning start ({:?} {})",
                play.half,
                play.inning
            );
        }
        let pre_bases = if is_half_inning_start {
            BaseState::EMPTY
        } else {
            self.bases.clone()
        };

        let advanced = advance(&pre_bases, &event.movements, batter, is_half_inning_start)
            .map_err(|fault| fault.at(location))?;
        let post_score = apply_runs(self.score, advanced.runs_scored, play.half.batting_team());

        let record = StateRecord {
            location,
            is_half_inning_start,
            bases: Transition {
                pre: pre_bases,
                post: advanced.post.clone(),
            },
            score: Transition {
                pre: self.score,
                post: post_score,
            },
            runs_scored: advanced.runs_scored,
        };
        let next = Self {
            previous_half: Some(play.half),
            bases: advanced.post,
            score: post_score,
        };
        Ok((next, record))
    }
}
