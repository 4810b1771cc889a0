//! The per-sub-event output record.

use basetrace_engine::{
    BaseState, EventLocation, EventType, HalfInning, MissingField, Play, Player,
    ReconstructError, ScoreState, StateRecord, SubEvent, Team, Transition,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    event_classifier,
    hit::HitKind,
    rbi_impact::{self, RbiImpact},
    situation::SituationFeatures,
};

/// Facts about the whole game that individual sub-events depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameContext {
    /// Highest inning any play reached. `None` for a game without plays.
    pub final_inning: Option<u8>,
}

impl GameContext {
    #[must_use]
    pub fn from_plays(plays: &[Play]) -> Self {
        Self {
            final_inning: plays.iter().map(|p| p.inning).max(),
        }
    }

    /// The bottom half of the game's highest inning.
    #[must_use]
    pub fn is_final_half_inning(&self, half: HalfInning, inning: u8) -> bool {
        half.is_bottom() && self.final_inning == Some(inning)
    }
}

/// One sub-event with its reconstructed state and derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    pub location: EventLocation,
    pub half: HalfInning,
    pub batting_team: Team,
    pub inning: u8,
    pub is_half_inning_start: bool,
    /// Canonical type: the play's result on the terminal sub-event, the feed type otherwise.
    pub event_type: EventType,
    pub is_non_informational: bool,
    pub batter: Player,
    pub bases: Transition<BaseState>,
    pub runner_count: Transition<u8>,
    pub score: Transition<ScoreState>,
    pub runs_scored: u32,
    /// Runs batted in as declared by the play result, zero except on the terminal sub-event.
    pub rbi: u32,
    pub rbi_impact: Option<RbiImpact>,
    pub hit: Option<HitKind>,
    pub is_final_half_inning: bool,
    pub elapsed_seconds: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub situation: SituationFeatures,
}

/// Annotates a state record with classification and situational features.
///
/// `play_start_score` is the score before the first sub-event of `play`; the RBI impact of the
/// terminal sub-event is measured against it.
pub fn enrich(
    record: StateRecord,
    play: &Play,
    event: &SubEvent,
    context: &GameContext,
    play_start_score: ScoreState,
) -> Result<EnrichedEvent, ReconstructError> {
    let location = record.location;
    let missing = |field| ReconstructError::MissingField { location, field };

    let batter = play.batter.clone().ok_or_else(|| missing(MissingField::Batter))?;
    let is_terminal = location.event.is_some_and(|e| play.is_terminal(e));
    let event_type =
        event_classifier::classify(event, &play.result, is_terminal).map_err(missing)?;
    let is_non_informational =
        event_classifier::is_non_informational(&event_type, event.is_base_running_play);

    let batting_team = play.half.batting_team();
    let is_final_half_inning = context.is_final_half_inning(play.half, play.inning);
    let (rbi, rbi_impact) = if is_terminal {
        let pre_deficit = -play_start_score.differential(batting_team);
        let rbi = play.result.rbi;
        (
            rbi,
            rbi_impact::classify_rbi(rbi, pre_deficit, is_final_half_inning),
        )
    } else {
        (0, None)
    };

    let situation = SituationFeatures::derive(
        &record.bases.pre,
        record.score.pre.differential(batting_team),
        play.inning,
    );

    Ok(EnrichedEvent {
        location,
        half: play.half,
        batting_team,
        inning: play.inning,
        is_half_inning_start: record.is_half_inning_start,
        hit: HitKind::from_event_type(&event_type),
        event_type,
        is_non_informational,
        batter,
        runner_count: Transition {
            pre: record.bases.pre.runner_count(),
            post: record.bases.post.runner_count(),
        },
        bases: record.bases,
        score: record.score,
        runs_scored: record.runs_scored,
        rbi,
        rbi_impact,
        is_final_half_inning,
        elapsed_seconds: event.elapsed_seconds(),
        start_time: event.start_time,
        end_time: event.end_time,
        description: event.description.clone(),
        situation,
    })
}

#[cfg(test)]
mod tests {
    use basetrace_engine::{Base, Destination, Movement, PlayResult, TraceState};

    use super::*;
    use crate::{
        FeatureGroup,
        situation::{RunnerStatus, ScoreDifference},
    };

    fn runner_on(base: Base) -> TraceState {
        let setup = Play::new(
            HalfInning::Bottom,
            9,
            Player::new(10, "Runner"),
            PlayResult::new("double", 0),
        )
        .with_events([SubEvent::new(0, "pitch")
            .with_movements([Movement::batter(Destination::Base(base))])]);
        let (state, _) = TraceState::new()
            .step(&setup, &setup.events[0], EventLocation::event(0, 0))
            .unwrap();
        state
    }

    fn enrich_all(
        state: &TraceState,
        play: &Play,
        context: &GameContext,
        play_index: usize,
    ) -> Vec<EnrichedEvent> {
        let play_start = state.score();
        let mut state = state.clone();
        let mut out = vec![];
        for (e, event) in play.events.iter().enumerate() {
            let (next, record) = state
                .step(play, event, EventLocation::event(play_index, e))
                .unwrap();
            out.push(enrich(record, play, event, context, play_start).unwrap());
            state = next;
        }
        out
    }

    #[test]
    fn test_quiet_away_play() {
        let play = Play::new(
            HalfInning::Top,
            1,
            Player::new(1, "Leadoff"),
            PlayResult::new("field_out", 0),
        )
        .with_events([SubEvent::new(0, "pitch")]);
        let context = GameContext::from_plays(std::slice::from_ref(&play));
        let events = enrich_all(&TraceState::new(), &play, &context, 0);

        let event = &events[0];
        assert_eq!(event.batting_team, Team::Away);
        assert_eq!(event.event_type.as_str(), "field_out");
        assert!(event.bases.pre.is_empty() && event.bases.post.is_empty());
        assert_eq!(event.score.pre, event.score.post);
        assert_eq!(event.situation.runner_status, RunnerStatus::None);
        assert_eq!(event.rbi_impact, None);
    }

    #[test]
    fn test_two_run_home_run() {
        let state = runner_on(Base::Second);
        let play = Play::new(
            HalfInning::Bottom,
            9,
            Player::new(2, "Slugger"),
            PlayResult::new("home_run", 2),
        )
        .with_events([
            SubEvent::new(0, "pitch"),
            SubEvent::new(1, "pitch").with_movements([
                Movement::batter(Destination::Score),
                Movement::runner(Base::Second, Destination::Score),
            ]),
        ]);
        let context = GameContext {
            final_inning: Some(9),
        };
        let events = enrich_all(&state, &play, &context, 1);

        assert_eq!(events[0].event_type.as_str(), "pitch");
        assert_eq!(events[0].rbi, 0);
        assert_eq!(events[0].hit, None);

        let last = &events[1];
        assert_eq!(last.event_type.as_str(), "home_run");
        assert_eq!(last.hit, Some(HitKind::HomeRun));
        assert_eq!(last.runs_scored, 2);
        assert_eq!(last.rbi, 2);
        assert!(last.bases.post.is_empty());
        assert_eq!(last.runner_count, Transition { pre: 1, post: 0 });
        assert_eq!(last.score.post, ScoreState::new(0, 2));
        assert_eq!(last.situation.runner_status, RunnerStatus::Second);
    }

    fn rbi_play(half: HalfInning, inning: u8, rbi: u32) -> Play {
        Play::new(half, inning, Player::new(3, "Hitter"), PlayResult::new("double", rbi))
            .with_events([SubEvent::new(0, "pitch")])
    }

    fn terminal_impact(
        play: &Play,
        context: &GameContext,
        play_start: ScoreState,
    ) -> EnrichedEvent {
        let (_, record) = TraceState::new()
            .step(play, &play.events[0], EventLocation::event(5, 0))
            .unwrap();
        enrich(record, play, &play.events[0], context, play_start).unwrap()
    }

    #[test]
    fn test_rbi_matching_deficit_ties() {
        let play = rbi_play(HalfInning::Top, 6, 2);
        let context = GameContext {
            final_inning: Some(9),
        };
        let event = terminal_impact(&play, &context, ScoreState::new(1, 3));

        assert_eq!(event.rbi_impact, Some(RbiImpact::Tie));
        let flags = RbiImpact::one_hot(event.rbi_impact);
        assert_eq!(
            flags,
            vec![
                ("regular", false),
                ("tie", true),
                ("go_ahead", false),
                ("walkoff", false)
            ]
        );
    }

    #[test]
    fn test_rbi_overturning_deficit() {
        let context = GameContext {
            final_inning: Some(9),
        };
        let trailing_by_one = ScoreState::new(4, 3);

        let play = rbi_play(HalfInning::Bottom, 8, 2);
        let event = terminal_impact(&play, &context, trailing_by_one);
        assert!(!event.is_final_half_inning);
        assert_eq!(event.rbi_impact, Some(RbiImpact::GoAhead));

        let play = rbi_play(HalfInning::Bottom, 9, 2);
        let event = terminal_impact(&play, &context, trailing_by_one);
        assert!(event.is_final_half_inning);
        assert_eq!(event.rbi_impact, Some(RbiImpact::Walkoff));
    }

    #[test]
    fn test_situation_uses_batting_team_perspective() {
        let play = rbi_play(HalfInning::Bottom, 2, 0);
        let context = GameContext::from_plays(std::slice::from_ref(&play));
        let (_, mut record) = TraceState::new()
            .step(&play, &play.events[0], EventLocation::event(0, 0))
            .unwrap();
        record.score.pre = ScoreState::new(5, 1);
        let event =
            enrich(record, &play, &play.events[0], &context, ScoreState::new(5, 1)).unwrap();
        assert_eq!(
            event.situation.score_difference,
            ScoreDifference::MinusThreeOrMore
        );
        assert_eq!(event.rbi_impact, None);
    }

    #[test]
    fn test_terminal_without_result_type_names_location() {
        let mut play = rbi_play(HalfInning::Top, 1, 0);
        play.result.event_type = None;
        let (_, record) = TraceState::new()
            .step(&play, &play.events[0], EventLocation::event(7, 0))
            .unwrap();
        let err = enrich(
            record,
            &play,
            &play.events[0],
            &GameContext::default(),
            ScoreState::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReconstructError::MissingField {
                location: EventLocation::event(7, 0),
                field: MissingField::ResultEventType,
            }
        );
    }

    #[test]
    fn test_action_noise_is_flagged_not_dropped() {
        let play = Play::new(
            HalfInning::Top,
            3,
            Player::new(4, "Batter"),
            PlayResult::new("strikeout", 0),
        )
        .with_events([
            SubEvent::new(0, "action"),
            SubEvent::new(1, "action").with_base_running_play(true),
            SubEvent::new(2, "action").with_base_running_play(false),
            SubEvent::new(3, "pitch"),
        ]);
        let context = GameContext::from_plays(std::slice::from_ref(&play));
        let events = enrich_all(&TraceState::new(), &play, &context, 0);
        assert_eq!(events.len(), 4);
        assert!(events[0].is_non_informational);
        assert!(!events[1].is_non_informational);
        assert!(!events[2].is_non_informational);
        assert!(!events[3].is_non_informational);
    }

    #[test]
    fn test_final_half_inning_is_bottom_of_last_inning() {
        let plays = [
            rbi_play(HalfInning::Top, 10, 0),
            rbi_play(HalfInning::Bottom, 10, 0),
        ];
        let context = GameContext::from_plays(&plays);
        assert_eq!(context.final_inning, Some(10));
        assert!(!context.is_final_half_inning(HalfInning::Top, 10));
        assert!(context.is_final_half_inning(HalfInning::Bottom, 10));
        assert!(!context.is_final_half_inning(HalfInning::Bottom, 9));
        assert_eq!(GameContext::from_plays(&[]).final_inning, None);
    }
}
