//! Minute-by-minute view of a game
//!
//! Informational sub-events are bucketed by whole minutes elapsed since the earliest sub-event
//! start. A sub-event spanning several minutes is listed in each of them:
//!
//! ```text
//! game start                                              game end
//! |-- minute 0 --|-- minute 1 --|-- minute 2 --|-- ... --|
//!      [pitch]
//!          [-------- single --------]        -> minutes 0, 1
//! ```
//!
//! Sub-events without both timestamps cannot be placed and are left out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{sample::FeatureRow, trace::GameTrace};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteTimeline {
    pub game_pk: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_duration_minutes: i64,
    pub minutes: BTreeMap<i64, Vec<FeatureRow>>,
}

impl MinuteTimeline {
    #[must_use]
    pub fn from_trace(game_pk: u64, trace: &GameTrace) -> Self {
        let timed = trace
            .events
            .iter()
            .filter(|e| !e.is_non_informational)
            .filter_map(|e| Some((e, e.start_time?, e.end_time?)))
            .collect::<Vec<_>>();

        let start_time = timed.iter().map(|(_, start, _)| *start).min();
        let end_time = timed.iter().map(|(_, _, end)| *end).max();

        let mut minutes = BTreeMap::<i64, Vec<FeatureRow>>::new();
        let mut total_duration_minutes = 0;
        if let (Some(origin), Some(last)) = (start_time, end_time) {
            total_duration_minutes = (last - origin).num_minutes();
            for (event, start, end) in timed {
                let first_minute = (start - origin).num_minutes();
                let last_minute = (end - origin).num_minutes();
                if last_minute < first_minute {
                    log::warn!(
                        "game {game_pk}: {} ends before it starts",
                        event.location
                    );
                    continue;
                }
                let row = FeatureRow::from_event(event);
                for minute in first_minute..=last_minute {
                    minutes.entry(minute).or_default().push(row.clone());
                }
            }
        }

        Self {
            game_pk,
            start_time,
            end_time,
            total_duration_minutes,
            minutes,
        }
    }
}
