//! Sequential game driver
//!
//! The driver threads a [`TraceState`] through every sub-event of a game, left to right, and
//! enriches each [`StateRecord`](basetrace_engine::StateRecord) as it is produced:
//!
//! ```text
//! TraceState::new()
//!     │
//!     ├─ play 0 ─ step ─ enrich ─▶ EnrichedEvent (0, 0)
//!     │         ─ step ─ enrich ─▶ EnrichedEvent (0, 1)
//!     ├─ play 1 ─ step ─ enrich ─▶ EnrichedEvent (1, 0)
//!     ⋮
//! ```
//!
//! A play is committed only when all of its sub-events succeed. What happens to a play that
//! fails is decided by [`CorruptPlayPolicy`].
//!
//! Games share no state, so [`reconstruct_games`] runs them in parallel while each game stays
//! a strictly sequential fold.

use basetrace_engine::{EventLocation, MissingField, Play, ReconstructError, TraceState};
use basetrace_features::enriched::{EnrichedEvent, GameContext, enrich};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A game as an ordered sequence of plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_pk: u64,
    pub plays: Vec<Play>,
}

/// What to do with a play whose data cannot be reconstructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPlayPolicy {
    /// Fail the whole game with the play's error.
    #[default]
    RejectGame,
    /// Drop every sub-event of the play, clear the bases and continue with the score as it
    /// stood before the play.
    SkipPlay,
}

/// A play dropped under [`CorruptPlayPolicy::SkipPlay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPlay {
    pub play: usize,
    pub location: EventLocation,
    pub reason: String,
}

/// The reconstructed event sequence of one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTrace {
    /// Ordered by (play index, sub-event index).
    pub events: Vec<EnrichedEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_plays: Vec<SkippedPlay>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconstructor {
    pub policy: CorruptPlayPolicy,
}

impl Reconstructor {
    #[must_use]
    pub const fn new(policy: CorruptPlayPolicy) -> Self {
        Self { policy }
    }

    /// Reconstructs the trace of one game.
    ///
    /// An empty play sequence yields an empty trace.
    pub fn reconstruct(&self, plays: &[Play]) -> Result<GameTrace, ReconstructError> {
        let context = GameContext::from_plays(plays);
        let mut state = TraceState::new();
        let mut trace = GameTrace::default();

        for (play_index, play) in plays.iter().enumerate() {
            match reconstruct_play(&state, play, play_index, &context) {
                Ok((next, events)) => {
                    state = next;
                    trace.events.extend(events);
                }
                Err(err) => match self.policy {
                    CorruptPlayPolicy::RejectGame => return Err(err),
                    CorruptPlayPolicy::SkipPlay => {
                        log::warn!("skipping play {play_index}: {err}");
                        trace.skipped_plays.push(SkippedPlay {
                            play: play_index,
                            location: err.location(),
                            reason: err.to_string(),
                        });
                        state = state.after_skipped_play(play.half);
                    }
                },
            }
        }

        Ok(trace)
    }
}

fn reconstruct_play(
    state: &TraceState,
    play: &Play,
    play_index: usize,
    context: &GameContext,
) -> Result<(TraceState, Vec<EnrichedEvent>), ReconstructError> {
    if play.events.is_empty() {
        return Err(ReconstructError::MissingField {
            location: EventLocation::play(play_index),
            field: MissingField::SubEvents,
        });
    }

    let play_start_score = state.score();
    let mut state = state.clone();
    let mut events = Vec::with_capacity(play.events.len());
    let mut runs_scored = 0;
    for (event_index, event) in play.events.iter().enumerate() {
        let location = EventLocation::event(play_index, event_index);
        let (next, record) = state.step(play, event, location)?;
        runs_scored += record.runs_scored;
        events.push(enrich(record, play, event, context, play_start_score)?);
        state = next;
    }

    if play.result.rbi > runs_scored {
        log::warn!(
            "play {play_index}: declared rbi {} exceeds {runs_scored} runs scored",
            play.result.rbi
        );
    }

    Ok((state, events))
}

/// Result of reconstructing one game of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub game_pk: u64,
    pub result: Result<GameTrace, ReconstructError>,
}

/// Reconstructs independent games in parallel. Outcomes are in input order.
#[must_use]
pub fn reconstruct_games(reconstructor: &Reconstructor, games: &[Game]) -> Vec<GameOutcome> {
    games
        .par_iter()
        .map(|game| {
            let result = reconstructor.reconstruct(&game.plays);
            match &result {
                Ok(trace) => log::debug!(
                    "game {}: {} events, {} skipped plays",
                    game.game_pk,
                    trace.events.len(),
                    trace.skipped_plays.len()
                ),
                Err(err) => log::debug!("game {}: {err}", game.game_pk),
            }
            GameOutcome {
                game_pk: game.game_pk,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use basetrace_engine::{
        Base, Destination, HalfInning, InconsistentState, Movement, PlayResult, Player,
        ScoreState, SubEvent,
    };

    use super::*;

    fn play(
        half: HalfInning,
        inning: u8,
        batter: u64,
        result: &str,
        events: Vec<SubEvent>,
    ) -> Play {
        Play::new(
            half,
            inning,
            Player::new(batter, format!("Batter {batter}")),
            PlayResult::new(result, 0),
        )
        .with_events(events)
    }

    fn batter_to(destination: Destination) -> SubEvent {
        SubEvent::new(0, "pitch").with_movements([Movement::batter(destination)])
    }

    fn to_first() -> SubEvent {
        batter_to(Destination::Base(Base::First))
    }

    fn corrupt() -> SubEvent {
        SubEvent::new(0, "pitch")
            .with_movements([Movement::runner(Base::Third, Destination::Score)])
    }

    fn sample_game() -> Vec<Play> {
        vec![
            play(HalfInning::Top, 1, 1, "single", vec![to_first()]),
            play(
                HalfInning::Top,
                1,
                2,
                "walk",
                vec![to_first().with_movements([Movement::runner(
                    Base::First,
                    Destination::Base(Base::Second),
                )])],
            ),
            play(HalfInning::Top, 1, 3, "field_error", vec![corrupt()]),
            play(HalfInning::Top, 1, 4, "strikeout", vec![batter_to(Destination::Out)]),
            play(HalfInning::Bottom, 1, 5, "home_run", vec![batter_to(Destination::Score)]),
        ]
    }

    #[test]
    fn test_empty_game_is_empty_trace() {
        let trace = Reconstructor::default().reconstruct(&[]).unwrap();
        assert_eq!(trace, GameTrace::default());
    }

    #[test]
    fn test_play_without_sub_events_is_corrupt() {
        let plays = [play(HalfInning::Top, 1, 1, "single", vec![])];
        let err = Reconstructor::default().reconstruct(&plays).unwrap_err();
        assert_eq!(
            err,
            ReconstructError::MissingField {
                location: EventLocation::play(0),
                field: MissingField::SubEvents,
            }
        );
        assert_eq!(err.to_string(), "play 0: missing sub-events");
    }

    #[test]
    fn test_reject_game_names_failing_sub_event() {
        let err = Reconstructor::default()
            .reconstruct(&sample_game())
            .unwrap_err();
        assert_eq!(
            err,
            ReconstructError::InconsistentState {
                location: EventLocation::event(2, 0),
                kind: InconsistentState::EmptyDeparture { base: Base::Third },
            }
        );
    }

    #[test]
    fn test_skip_play_clears_bases_and_keeps_score() {
        let trace = Reconstructor::new(CorruptPlayPolicy::SkipPlay)
            .reconstruct(&sample_game())
            .unwrap();

        assert_eq!(trace.skipped_plays.len(), 1);
        assert_eq!(trace.skipped_plays[0].play, 2);
        assert_eq!(trace.skipped_plays[0].location, EventLocation::event(2, 0));
        assert!(trace.events.iter().all(|e| e.location.play != 2));

        let resumed = &trace.events[2];
        assert_eq!(resumed.location, EventLocation::event(3, 0));
        assert!(resumed.bases.pre.is_empty());
        assert_eq!(resumed.score.pre, ScoreState::new(0, 0));

        let last = trace.events.last().unwrap();
        assert_eq!(last.score.post, ScoreState::new(0, 1));
    }

    #[test]
    fn test_skipped_half_inning_still_flips_next_play() {
        let plays = [
            play(HalfInning::Top, 1, 1, "single", vec![to_first()]),
            play(HalfInning::Bottom, 1, 2, "field_error", vec![corrupt()]),
            play(HalfInning::Top, 2, 3, "single", vec![to_first()]),
        ];
        let trace = Reconstructor::new(CorruptPlayPolicy::SkipPlay)
            .reconstruct(&plays)
            .unwrap();

        assert_eq!(trace.skipped_plays.len(), 1);
        assert_eq!(trace.skipped_plays[0].play, 1);
        assert_eq!(trace.events.len(), 2);

        let resumed = &trace.events[1];
        assert_eq!(resumed.location, EventLocation::event(2, 0));
        assert!(resumed.is_half_inning_start);
        assert!(resumed.bases.pre.is_empty());
    }

    #[test]
    fn test_events_are_ordered_and_chained() {
        let mut plays = sample_game();
        plays.remove(2);
        let trace = Reconstructor::default().reconstruct(&plays).unwrap();
        for pair in trace.events.windows(2) {
            assert!(pair[0].location < pair[1].location);
            assert_eq!(pair[0].score.post, pair[1].score.pre);
            if !pair[1].is_half_inning_start {
                assert_eq!(pair[0].bases.post, pair[1].bases.pre);
            }
        }
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let mut good = sample_game();
        good.remove(2);
        let games = (0..16)
            .map(|i| Game {
                game_pk: i,
                plays: if i % 3 == 0 { sample_game() } else { good.clone() },
            })
            .collect::<Vec<_>>();

        let outcomes = reconstruct_games(&Reconstructor::default(), &games);
        assert_eq!(
            outcomes.iter().map(|o| o.game_pk).collect::<Vec<_>>(),
            (0..16).collect::<Vec<_>>()
        );
        for outcome in &outcomes {
            assert_eq!(outcome.result.is_err(), outcome.game_pk % 3 == 0);
        }
    }
}
