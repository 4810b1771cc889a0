//! Whole-game reconstruction and offline analysis of play-by-play feeds
//!
//! This crate drives the per-sub-event fold of [`basetrace_engine`] and the classifiers of
//! [`basetrace_features`] over complete games, and derives game-level views from the result.
//!
//! # Overview
//!
//! The analysis system supports three workflows:
//!
//! ## Trace Reconstruction Workflow
//!
//! 1. **Load Feed Data** ([`feed::FeedGame`]): Deserialize a live-feed JSON document
//! 2. **Convert** ([`trace::Game`]): Scope runner movements onto sub-events
//! 3. **Reconstruct** ([`trace::Reconstructor`]): Fold the game into a [`trace::GameTrace`],
//!    applying the configured [`trace::CorruptPlayPolicy`]
//! 4. **Batch** ([`trace::reconstruct_games`]): Reconstruct independent games in parallel
//!
//! ## Game Comparison Workflow
//!
//! 1. **Reconstruct** a trace as above
//! 2. **Summarize** ([`summary::GameSummary`]): Elapsed time, extra-base hits, runs, final
//!    margin and lead changes
//!
//! ## Feature Export Workflow
//!
//! 1. **Reconstruct** a trace as above
//! 2. **Flatten** ([`sample::FeatureRow`]): One `group.label -> bool` row per informational
//!    sub-event
//! 3. **Slice by Minute** ([`timeline::MinuteTimeline`]): Bucket rows by wall-clock minute
//!
//! # Example
//!
//! ```
//! use basetrace_analysis::{
//!     summary::GameSummary,
//!     trace::{Game, Reconstructor},
//! };
//!
//! let game = Game {
//!     game_pk: 1,
//!     plays: vec![],
//! };
//! let trace = Reconstructor::default().reconstruct(&game.plays).unwrap();
//! assert!(trace.events.is_empty());
//!
//! let summary = GameSummary::from_trace(game.game_pk, &trace);
//! assert_eq!(summary.total_runs, 0);
//! ```

pub mod feed;
pub mod sample;
pub mod summary;
pub mod timeline;
pub mod trace;
