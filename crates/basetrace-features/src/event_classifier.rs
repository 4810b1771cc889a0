//! Canonical event types for sub-events.
//!
//! The feed labels most sub-events generically (`"pitch"`, `"action"`, `"pickoff"`). The last
//! sub-event of a play is where the plate appearance resolves, so it takes the play's result
//! type instead (`"single"`, `"strikeout"`, ...).

use basetrace_engine::{EventType, MissingField, PlayResult, SubEvent};

/// Canonical type of `sub_event`.
///
/// Terminal sub-events take the play's result type; a terminal sub-event of a play without a
/// result type is a [`MissingField::ResultEventType`].
pub fn classify(
    sub_event: &SubEvent,
    play_result: &PlayResult,
    is_terminal: bool,
) -> Result<EventType, MissingField> {
    if !is_terminal {
        return Ok(sub_event.kind.clone());
    }
    play_result
        .event_type
        .clone()
        .ok_or(MissingField::ResultEventType)
}

/// Whether a sub-event is noise for modeling purposes (warm-ups, timeouts, mound visits).
///
/// Generic `"action"` sub-events are noise when the feed carries no base-running marker for
/// them at all. An explicit marker, true or false, keeps them informational. They stay in the
/// trace and are only flagged here.
#[must_use]
pub fn is_non_informational(event_type: &EventType, is_base_running_play: Option<bool>) -> bool {
    event_type.is_action() && is_base_running_play.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_terminal_keeps_own_type() {
        let event = SubEvent::new(0, "pitch");
        let result = PlayResult::new("strikeout", 0);
        assert_eq!(classify(&event, &result, false).unwrap().as_str(), "pitch");
    }

    #[test]
    fn test_terminal_takes_result_type() {
        let event = SubEvent::new(3, "pitch");
        let result = PlayResult::new("home_run", 2);
        assert_eq!(classify(&event, &result, true).unwrap().as_str(), "home_run");
    }

    #[test]
    fn test_terminal_without_result_type() {
        let event = SubEvent::new(3, "pitch");
        let result = PlayResult::default();
        assert_eq!(
            classify(&event, &result, true),
            Err(MissingField::ResultEventType)
        );
    }

    #[test]
    fn test_only_unmarked_action_is_noise() {
        assert!(is_non_informational(&EventType::from("action"), None));
        assert!(!is_non_informational(&EventType::from("action"), Some(false)));
        assert!(!is_non_informational(&EventType::from("action"), Some(true)));
        assert!(!is_non_informational(&EventType::from("pitch"), None));
        assert!(!is_non_informational(
            &EventType::from("stolen_base_2b"),
            None
        ));
    }
}
