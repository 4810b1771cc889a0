//! Per-game comparison record.

use basetrace_engine::Team;
use serde::{Deserialize, Serialize};

use crate::trace::GameTrace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_pk: u64,
    /// Sum of the sub-events' own durations, in minutes. Sub-events without both timestamps
    /// contribute nothing.
    pub elapsed_minutes: f64,
    /// Doubles, triples and home runs.
    pub extra_base_hits: u32,
    pub total_runs: u32,
    /// Absolute run difference at the end of the trace.
    pub final_margin: u32,
    /// Times the lead passed from one team directly or through a tie to the other.
    pub lead_changes: u32,
}

impl GameSummary {
    #[must_use]
    pub fn from_trace(game_pk: u64, trace: &GameTrace) -> Self {
        let elapsed_seconds = trace
            .events
            .iter()
            .filter_map(|e| e.elapsed_seconds)
            .sum::<f64>();
        let extra_base_hits = trace
            .events
            .iter()
            .filter(|e| e.hit.is_some_and(|h| h.is_extra_base()))
            .count();

        let mut leader: Option<Team> = None;
        let mut lead_changes = 0;
        for event in &trace.events {
            let Some(current) = event.score.post.leader() else {
                continue;
            };
            if leader.is_some_and(|l| l != current) {
                lead_changes += 1;
            }
            leader = Some(current);
        }

        let final_score = trace
            .events
            .last()
            .map(|e| e.score.post)
            .unwrap_or_default();

        Self {
            game_pk,
            elapsed_minutes: elapsed_seconds / 60.0,
            extra_base_hits: u32::try_from(extra_base_hits).unwrap_or(u32::MAX),
            total_runs: final_score.total(),
            final_margin: final_score.away.abs_diff(final_score.home),
            lead_changes,
        }
    }
}
