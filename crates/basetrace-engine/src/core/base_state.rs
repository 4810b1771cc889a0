use serde::{Deserialize, Serialize};

/// One of the three bases a runner can occupy.
///
/// Home plate is not a base here: reaching it is [`Destination::Score`](super::Destination::Score).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    #[display("1B")]
    First,
    #[display("2B")]
    Second,
    #[display("3B")]
    Third,
}

impl Base {
    /// All bases in diamond order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Parses the feed notation (`"1B"`, `"2B"`, `"3B"`).
    #[must_use]
    pub fn from_feed(s: &str) -> Option<Self> {
        match s {
            "1B" => Some(Self::First),
            "2B" => Some(Self::Second),
            "3B" => Some(Self::Third),
            _ => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Identity of a batter or baserunner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub full_name: String,
}

impl Player {
    #[must_use]
    pub fn new(id: u64, full_name: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id),
            full_name: full_name.into(),
        }
    }
}

/// Occupant of each base at one instant.
///
/// Every base holds at most one player by construction. A single player appearing on two
/// bases is rejected by the base-runner state machine rather than prevented by the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseState {
    pub first: Option<Player>,
    pub second: Option<Player>,
    pub third: Option<Player>,
}

impl BaseState {
    pub const EMPTY: Self = Self {
        first: None,
        second: None,
        third: None,
    };

    #[must_use]
    pub fn get(&self, base: Base) -> Option<&Player> {
        match base {
            Base::First => self.first.as_ref(),
            Base::Second => self.second.as_ref(),
            Base::Third => self.third.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, base: Base) -> &mut Option<Player> {
        match base {
            Base::First => &mut self.first,
            Base::Second => &mut self.second,
            Base::Third => &mut self.third,
        }
    }

    /// Removes and returns the occupant of `base`.
    pub fn take(&mut self, base: Base) -> Option<Player> {
        self.slot_mut(base).take()
    }

    /// Returns a copy with `player` placed on `base`, replacing any occupant.
    #[must_use]
    pub fn with_runner(mut self, base: Base, player: Player) -> Self {
        *self.slot_mut(base) = Some(player);
        self
    }

    #[must_use]
    pub fn is_occupied(&self, base: Base) -> bool {
        self.get(base).is_some()
    }

    /// Occupancy flags indexed by [`Base::index`].
    #[must_use]
    pub fn occupancy(&self) -> [bool; 3] {
        Base::ALL.map(|base| self.is_occupied(base))
    }

    #[must_use]
    pub fn runner_count(&self) -> u8 {
        Base::ALL
            .into_iter()
            .map(|base| u8::from(self.is_occupied(base)))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runner_count() == 0
    }

    pub fn runners(&self) -> impl Iterator<Item = (Base, &Player)> + '_ {
        Base::ALL
            .into_iter()
            .filter_map(|base| self.get(base).map(|player| (base, player)))
    }
}
