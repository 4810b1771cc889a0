//! Core data structures: the immutable play-by-play input and the state snapshots derived
//! from it.
//!
//! - [`Play`], [`SubEvent`], [`Movement`] - one plate appearance, its ordered sub-events, and
//!   the runner transitions scoped to each sub-event
//! - [`BaseState`] - occupant (or none) of first, second and third base
//! - [`ScoreState`] - running away/home totals
//! - [`HalfInning`], [`Team`] - which side is batting

pub use self::{base_state::*, play::*, score_state::*};

pub(crate) mod base_state;
pub(crate) mod play;
pub(crate) mod score_state;
