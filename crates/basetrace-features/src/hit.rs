use basetrace_engine::EventType;
use serde::{Deserialize, Serialize};

use crate::FeatureGroup;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Single,
    Double,
    Triple,
    HomeRun,
}

impl HitKind {
    /// Hit kind of a canonical event type, `None` for anything that is not a base hit.
    #[must_use]
    pub fn from_event_type(event_type: &EventType) -> Option<Self> {
        match event_type.as_str() {
            "single" => Some(Self::Single),
            "double" => Some(Self::Double),
            "triple" => Some(Self::Triple),
            "home_run" => Some(Self::HomeRun),
            _ => None,
        }
    }

    /// Double or better.
    #[must_use]
    pub const fn is_extra_base(self) -> bool {
        !matches!(self, Self::Single)
    }
}

impl FeatureGroup for HitKind {
    const GROUP: &'static str = "hit_event";
    const VALUES: &'static [Self] = &[Self::Single, Self::Double, Self::Triple, Self::HomeRun];

    fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::HomeRun => "home_run",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_event_type() {
        assert_eq!(
            HitKind::from_event_type(&"home_run".into()),
            Some(HitKind::HomeRun)
        );
        assert_eq!(HitKind::from_event_type(&"walk".into()), None);
        assert_eq!(HitKind::from_event_type(&"pitch".into()), None);
    }

    #[test]
    fn test_extra_base() {
        assert!(!HitKind::Single.is_extra_base());
        assert!(HitKind::Double.is_extra_base());
        assert!(HitKind::HomeRun.is_extra_base());
    }

    #[test]
    fn test_labels_follow_value_order() {
        let labels = HitKind::VALUES
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["single", "double", "triple", "home_run"]);
    }
}
