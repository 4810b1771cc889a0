use crate::core::HalfInning;

/// Returns whether `current` starts a new half-inning.
///
/// With no previous half (the first play of a game) this is always a half-inning start.
#[must_use]
pub fn is_new_half(current: HalfInning, previous: Option<HalfInning>) -> bool {
    previous != Some(current)
}
