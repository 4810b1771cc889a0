//! State machines that replay a game one sub-event at a time.
//!
//! - [`is_new_half`] - Detects the boundary where the batting team changes
//! - [`advance`] - Folds a sub-event's runner movements into the next [`BaseState`]
//! - [`apply_runs`] - Credits runs scored in a sub-event to the batting team
//! - [`TraceState`] - The carried state, advanced by the pure [`TraceState::step`]
//!
//! # Replay Flow
//!
//! ```text
//! TraceState (previous half, bases, score)
//!     ↓ step(play, sub-event)
//! is_new_half ─→ bases reset to empty on a flip
//!     ↓
//! advance ─────→ post bases + runs scored
//!     ↓
//! apply_runs ──→ post score
//!     ↓
//! (next TraceState, StateRecord)
//! ```
//!
//! The fold is strictly sequential within a game: the pre-state of every sub-event is the
//! post-state of the one before it, except at half-inning boundaries where the bases are
//! cleared. Independent games share nothing and can be replayed in parallel.
//!
//! # Example
//!
//! ```
//! use basetrace_engine::{
//!     Base, Destination, EventLocation, HalfInning, Movement, Play, PlayResult, Player,
//!     SubEvent, TraceState,
//! };
//!
//! let play = Play::new(
//!     HalfInning::Top,
//!     1,
//!     Player::new(1, "Leadoff Hitter"),
//!     PlayResult::new("single", 0),
//! )
//! .with_events([SubEvent::new(0, "pitch")
//!     .with_movements([Movement::batter(Destination::Base(Base::First))])]);
//!
//! let state = TraceState::new();
//! let (next, record) = state
//!     .step(&play, &play.events[0], EventLocation::event(0, 0))
//!     .unwrap();
//!
//! assert!(record.bases.pre.is_empty());
//! assert!(next.bases().is_occupied(Base::First));
//! ```

pub use self::{base_runner::*, half_inning::*, score_tracker::*, trace_state::*};

mod base_runner;
mod half_inning;
mod score_tracker;
mod trace_state;
