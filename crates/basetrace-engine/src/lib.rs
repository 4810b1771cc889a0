//! Game-state reconstruction for play-by-play baseball data.
//!
//! This crate holds the input data model and the state machines that replay a game one
//! sub-event at a time:
//!
//! - [`core`] - Plays, sub-events and runner movements as they arrive from the feed, plus the
//!   [`BaseState`] and [`ScoreState`] snapshots derived from them
//! - [`engine`] - The half-inning tracker, base-runner state machine, score tracker and the
//!   [`TraceState`] fold that threads them together
//!
//! Everything here is synchronous and free of I/O. Data acquisition and feature derivation
//! live in other crates.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Position of a sub-event inside a game, by play index and sub-event index.
///
/// `event` is `None` for failures that concern the play as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventLocation {
    pub play: usize,
    pub event: Option<usize>,
}

impl EventLocation {
    #[must_use]
    pub const fn play(play: usize) -> Self {
        Self { play, event: None }
    }

    #[must_use]
    pub const fn event(play: usize, event: usize) -> Self {
        Self {
            play,
            event: Some(event),
        }
    }
}

// Not derived: the sub-event part is printed only when present.
impl fmt::Display for EventLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            Some(event) => write!(f, "play {}, sub-event {event}", self.play),
            None => write!(f, "play {}", self.play),
        }
    }
}

/// A structural field the reconstruction cannot proceed without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    #[display("batter identity")]
    Batter,
    #[display("movement start base")]
    MovementStart,
    #[display("movement destination")]
    MovementEnd,
    #[display("result event type")]
    ResultEventType,
    #[display("sub-events")]
    SubEvents,
}

/// A violated base-occupancy postcondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum InconsistentState {
    #[display("a runner leaves {base} but the base is empty")]
    EmptyDeparture { base: Base },
    #[display("{base} would hold two runners")]
    ConflictingOccupants { base: Base },
    #[display("player {player} occupies more than one base")]
    DuplicateRunner { player: PlayerId },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReconstructError {
    #[display("{location}: missing {field}")]
    MissingField {
        location: EventLocation,
        field: MissingField,
    },
    #[display("{location}: inconsistent state: {kind}")]
    InconsistentState {
        location: EventLocation,
        kind: InconsistentState,
    },
}

impl ReconstructError {
    #[must_use]
    pub fn location(&self) -> EventLocation {
        match self {
            Self::MissingField { location, .. } | Self::InconsistentState { location, .. } => {
                *location
            }
        }
    }
}
