//! Per-sub-event classification and situational features.
//!
//! This crate turns the [`StateRecord`](basetrace_engine::StateRecord)s produced by the engine
//! fold into [`EnrichedEvent`](enriched::EnrichedEvent)s, the fixed schema handed to the
//! modeling side:
//!
//! 1. **Event classification** ([`event_classifier`]) - Canonical event type of a sub-event,
//!    with the play's result substituted on the terminal sub-event, and the non-informational
//!    flag for pre-pitch noise
//! 2. **RBI impact** ([`rbi_impact`]) - Regular / tie / go-ahead / walk-off label of the
//!    play's runs batted in
//! 3. **Hit kind** ([`hit`]) - Single / double / triple / home run
//! 4. **Situation** ([`situation`]) - Runner status, score difference, inning phase and the
//!    go-ahead-runner flag, all derived from the pre-event state
//!
//! # Feature Groups
//!
//! Every one-hot group is an enum implementing [`FeatureGroup`]. A group value is a single
//! variant, so exactly one flag is set by construction; groups that may be absent (RBI
//! impact, hit kind) are wrapped in `Option` and produce all-false flags when `None`.
//!
//! ```
//! use basetrace_features::{FeatureGroup, situation::InningPhase};
//!
//! let flags = InningPhase::one_hot(Some(InningPhase::from_inning(5)));
//! assert_eq!(flags, vec![("early", false), ("middle", true), ("late", false)]);
//! ```

pub mod enriched;
pub mod event_classifier;
pub mod hit;
pub mod rbi_impact;
pub mod situation;

/// A mutually exclusive group of boolean features.
pub trait FeatureGroup: Copy + PartialEq + 'static {
    /// Group name, used as the column prefix in flattened exports.
    const GROUP: &'static str;
    /// Every value of the group in column order.
    const VALUES: &'static [Self];

    /// Column label of this value within the group.
    #[must_use]
    fn label(self) -> &'static str;

    /// One flag per group value, set only for `value`.
    #[must_use]
    fn one_hot(value: Option<Self>) -> Vec<(&'static str, bool)> {
        Self::VALUES
            .iter()
            .map(|&v| (v.label(), Some(v) == value))
            .collect()
    }
}
