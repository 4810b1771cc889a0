use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    base_state::{Base, Player},
    score_state::HalfInning,
};

/// Event type label as it appears in the feed (`"pitch"`, `"action"`, `"single"`, ...).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    /// Generic type of in-game actions (mound visits, substitutions, steals, ...).
    pub const ACTION: &'static str = "action";

    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.0 == Self::ACTION
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a runner ends up after a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Base(Base),
    /// Crossed home plate; credits a run to the batting team.
    Score,
    /// Put out on the bases; leaves the diamond without scoring.
    Out,
}

/// A single runner transition scoped to one sub-event.
///
/// `origin` is where the runner stood when the play began (`None` for the batter), `start`
/// is the base the runner leaves within this sub-event. The two differ when a runner already
/// advanced on an earlier sub-event of the same play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement {
    pub origin: Option<Base>,
    pub start: Option<Base>,
    pub end: Option<Destination>,
}

impl Movement {
    #[must_use]
    pub const fn new(origin: Option<Base>, start: Option<Base>, end: Destination) -> Self {
        Self {
            origin,
            start,
            end: Some(end),
        }
    }

    #[must_use]
    pub const fn batter(end: Destination) -> Self {
        Self::new(None, None, end)
    }

    /// A runner that began the play on `base` and leaves it in this sub-event.
    #[must_use]
    pub const fn runner(base: Base, end: Destination) -> Self {
        Self::new(Some(base), Some(base), end)
    }
}

/// Atomic occurrence within a play: a pitch, an in-game action, or the play's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubEvent {
    pub index: u32,
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_base_running_play: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl SubEvent {
    #[must_use]
    pub fn new(index: u32, kind: impl Into<EventType>) -> Self {
        Self {
            index,
            kind: kind.into(),
            is_base_running_play: None,
            description: None,
            start_time: None,
            end_time: None,
            movements: vec![],
        }
    }

    #[must_use]
    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self
    }

    #[must_use]
    pub fn with_times(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    #[must_use]
    pub fn with_base_running_play(mut self, is_base_running_play: bool) -> Self {
        self.is_base_running_play = Some(is_base_running_play);
        self
    }

    /// Seconds between the sub-event's own start and end timestamps.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<f64> {
        let (start, end) = (self.start_time?, self.end_time?);
        let delta = end - start;
        Some(delta.num_milliseconds() as f64 / 1000.0)
    }
}

/// Final outcome of a play as reported by the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    /// Canonical result type (`"single"`, `"home_run"`, `"strikeout"`, ...). Absent for plays
    /// that have not completed.
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default)]
    pub home_score: u32,
}

impl PlayResult {
    #[must_use]
    pub fn new(event_type: impl Into<EventType>, rbi: u32) -> Self {
        Self {
            event_type: Some(event_type.into()),
            rbi,
            away_score: 0,
            home_score: 0,
        }
    }
}

/// One plate appearance with its ordered sub-events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub half: HalfInning,
    pub inning: u8,
    pub batter: Option<Player>,
    pub result: PlayResult,
    pub events: Vec<SubEvent>,
}

impl Play {
    #[must_use]
    pub fn new(half: HalfInning, inning: u8, batter: Player, result: PlayResult) -> Self {
        Self {
            half,
            inning,
            batter: Some(batter),
            result,
            events: vec![],
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = SubEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Index of the sub-event that carries the play's result.
    #[must_use]
    pub fn terminal_index(&self) -> Option<usize> {
        self.events.len().checked_sub(1)
    }

    #[must_use]
    pub fn is_terminal(&self, event_index: usize) -> bool {
        self.terminal_index() == Some(event_index)
    }
}
