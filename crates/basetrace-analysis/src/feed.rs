//! Live-feed JSON mirror
//!
//! Serde mirror of the parts of the MLB Stats API live game feed that reconstruction reads,
//! and its conversion into a [`Game`].
//!
//! # Data Structure
//!
//! ```text
//! FeedGame
//! ├─ gamePk
//! ├─ gameData.status.abstractGameState
//! └─ liveData.plays.allPlays: Vec<FeedPlay>
//!     ├─ about (isTopInning, inning)
//!     ├─ matchup.batter (id, fullName)
//!     ├─ result (eventType, rbi, awayScore, homeScore)
//!     ├─ playEvents: Vec<FeedPlayEvent>
//!     │   └─ index, type, isBaseRunningPlay, startTime, endTime, details.description
//!     └─ runners: Vec<FeedRunner>
//!         ├─ movement (originBase, start, end, isOut)
//!         └─ details.playIndex
//! ```
//!
//! Runner entries are listed per play; `details.playIndex` names the sub-event (by its
//! `index`) in which the movement happened. Conversion scopes each entry onto that sub-event,
//! keeping feed order.
//!
//! Fields the feed may omit are `Option`s or default to empty here. Whether their absence is
//! acceptable is decided by the reconstruction, which reports it with the play and sub-event
//! index.

use basetrace_engine::{
    Base, Destination, EventType, HalfInning, Movement, Play, PlayResult, Player, SubEvent,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::trace::Game;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FeedError {
    #[display("play {play}: runner movement refers to missing sub-event {play_index}")]
    UnscopedRunner { play: usize, play_index: u32 },
    #[display("play {play}: unknown base {value:?}")]
    UnknownBase { play: usize, value: String },
    #[display("play {play}: inning {inning} is out of range")]
    InningOutOfRange { play: usize, inning: u32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedGame {
    pub game_pk: u64,
    #[serde(default)]
    pub game_data: FeedGameData,
    pub live_data: FeedLiveData,
}

impl FeedGame {
    /// Whether the feed reports the game as finished.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.game_data.status.abstract_game_state.as_deref() == Some("Final")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedGameData {
    #[serde(default)]
    pub status: FeedStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub abstract_game_state: Option<String>,
    pub detailed_state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedLiveData {
    pub plays: FeedPlays,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlays {
    #[serde(default)]
    pub all_plays: Vec<FeedPlay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlay {
    pub about: FeedAbout,
    #[serde(default)]
    pub matchup: FeedMatchup,
    #[serde(default)]
    pub result: FeedResult,
    #[serde(default)]
    pub play_events: Vec<FeedPlayEvent>,
    #[serde(default)]
    pub runners: Vec<FeedRunner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedAbout {
    pub is_top_inning: bool,
    pub inning: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMatchup {
    pub batter: Option<FeedPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPerson {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
}

impl From<FeedPerson> for Player {
    fn from(person: FeedPerson) -> Self {
        Self::new(person.id, person.full_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResult {
    pub event_type: Option<String>,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default)]
    pub home_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPlayEvent {
    pub index: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_base_running_play: Option<bool>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: FeedEventDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEventDetails {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRunner {
    pub movement: FeedMovement,
    pub details: FeedRunnerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMovement {
    pub origin_base: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub is_out: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRunnerDetails {
    pub play_index: u32,
}

fn parse_base(play: usize, value: Option<&str>) -> Result<Option<Base>, FeedError> {
    value
        .map(|v| {
            Base::from_feed(v).ok_or_else(|| FeedError::UnknownBase {
                play,
                value: v.to_owned(),
            })
        })
        .transpose()
}

fn parse_destination(
    play: usize,
    movement: &FeedMovement,
) -> Result<Option<Destination>, FeedError> {
    match movement.end.as_deref() {
        Some("score" | "4B") => Ok(Some(Destination::Score)),
        Some(base) => parse_base(play, Some(base)).map(|b| b.map(Destination::Base)),
        None if movement.is_out => Ok(Some(Destination::Out)),
        None => Ok(None),
    }
}

impl FeedMovement {
    fn to_movement(&self, play: usize) -> Result<Movement, FeedError> {
        Ok(Movement {
            origin: parse_base(play, self.origin_base.as_deref())?,
            start: parse_base(play, self.start.as_deref())?,
            end: parse_destination(play, self)?,
        })
    }
}

impl FeedPlay {
    fn into_play(self, play_index: usize) -> Result<Play, FeedError> {
        let inning = u8::try_from(self.about.inning).map_err(|_| FeedError::InningOutOfRange {
            play: play_index,
            inning: self.about.inning,
        })?;

        let mut events = self
            .play_events
            .into_iter()
            .map(|e| SubEvent {
                index: e.index,
                kind: EventType::new(e.kind),
                is_base_running_play: e.is_base_running_play,
                description: e.details.description,
                start_time: e.start_time,
                end_time: e.end_time,
                movements: vec![],
            })
            .collect::<Vec<_>>();

        for runner in &self.runners {
            let play_index_ref = runner.details.play_index;
            let event = events
                .iter_mut()
                .find(|e| e.index == play_index_ref)
                .ok_or(FeedError::UnscopedRunner {
                    play: play_index,
                    play_index: play_index_ref,
                })?;
            event.movements.push(runner.movement.to_movement(play_index)?);
        }

        Ok(Play {
            half: HalfInning::from_is_top(self.about.is_top_inning),
            inning,
            batter: self.matchup.batter.map(Player::from),
            result: PlayResult {
                event_type: self.result.event_type.map(EventType::new),
                rbi: self.result.rbi,
                away_score: self.result.away_score,
                home_score: self.result.home_score,
            },
            events,
        })
    }
}

impl TryFrom<FeedGame> for Game {
    type Error = FeedError;

    fn try_from(feed: FeedGame) -> Result<Self, Self::Error> {
        let plays = feed
            .live_data
            .plays
            .all_plays
            .into_iter()
            .enumerate()
            .map(|(i, play)| play.into_play(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            game_pk: feed.game_pk,
            plays,
        })
    }
}
