//! Flat feature rows
//!
//! A [`FeatureRow`] is the export form of an
//! [`EnrichedEvent`](basetrace_features::enriched::EnrichedEvent): every one-hot group
//! becomes `group.label` columns, so downstream tooling can treat a trace as a sparse boolean
//! table without knowing the group enums.
//!
//! ```text
//! hit_event.single           false
//! hit_event.double           true
//! ...
//! runner_status.first-third  true
//! ...
//! is_goahead_runner_on_base  false
//! ```
//!
//! Non-informational sub-events are not exported.

use std::collections::BTreeMap;

use basetrace_engine::{EventLocation, EventType};
use basetrace_features::{
    FeatureGroup,
    enriched::EnrichedEvent,
    hit::HitKind,
    rbi_impact::RbiImpact,
    situation::{InningPhase, RunnerStatus, ScoreDifference},
};
use serde::{Deserialize, Serialize};

use crate::trace::GameTrace;

pub const GOAHEAD_RUNNER_COLUMN: &str = "is_goahead_runner_on_base";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub location: EventLocation,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: BTreeMap<String, bool>,
}

fn push_group<G>(columns: &mut BTreeMap<String, bool>, value: Option<G>)
where
    G: FeatureGroup,
{
    for (label, flag) in G::one_hot(value) {
        columns.insert(format!("{}.{label}", G::GROUP), flag);
    }
}

impl FeatureRow {
    #[must_use]
    pub fn from_event(event: &EnrichedEvent) -> Self {
        let situation = &event.situation;
        let mut columns = BTreeMap::new();
        push_group::<HitKind>(&mut columns, event.hit);
        push_group::<RbiImpact>(&mut columns, event.rbi_impact);
        push_group::<RunnerStatus>(&mut columns, Some(situation.runner_status));
        push_group::<ScoreDifference>(&mut columns, Some(situation.score_difference));
        push_group::<InningPhase>(&mut columns, Some(situation.inning_phase));
        columns.insert(
            GOAHEAD_RUNNER_COLUMN.to_owned(),
            situation.is_goahead_runner_on_base,
        );
        Self {
            location: event.location,
            event_type: event.event_type.clone(),
            description: event.description.clone(),
            columns,
        }
    }

    /// Rows of every informational sub-event of `trace`, in trace order.
    #[must_use]
    pub fn from_trace(trace: &GameTrace) -> Vec<Self> {
        trace
            .events
            .iter()
            .filter(|e| !e.is_non_informational)
            .map(Self::from_event)
            .collect()
    }

    /// Value of a column; absent columns read as `false`.
    #[must_use]
    pub fn get(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(false)
    }
}
