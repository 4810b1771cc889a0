use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Away,
    Home,
}

impl Team {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }
}

/// Which half of an inning a play belongs to.
///
/// The visiting team bats in the top half, the home team in the bottom half.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum HalfInning {
    Top,
    Bottom,
}

impl HalfInning {
    #[must_use]
    pub const fn from_is_top(is_top: bool) -> Self {
        if is_top { Self::Top } else { Self::Bottom }
    }

    #[must_use]
    pub const fn batting_team(self) -> Team {
        match self {
            Self::Top => Team::Away,
            Self::Bottom => Team::Home,
        }
    }
}

/// Running totals for both teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    pub away: u32,
    pub home: u32,
}

impl ScoreState {
    #[must_use]
    pub const fn new(away: u32, home: u32) -> Self {
        Self { away, home }
    }

    #[must_use]
    pub const fn get(&self, team: Team) -> u32 {
        match team {
            Team::Away => self.away,
            Team::Home => self.home,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.away + self.home
    }

    /// Score of `team` minus score of its opponent.
    #[must_use]
    pub fn differential(&self, team: Team) -> i64 {
        i64::from(self.get(team)) - i64::from(self.get(team.opponent()))
    }

    /// Team currently ahead, or `None` when tied.
    #[must_use]
    pub fn leader(&self) -> Option<Team> {
        match self.away.cmp(&self.home) {
            std::cmp::Ordering::Greater => Some(Team::Away),
            std::cmp::Ordering::Less => Some(Team::Home),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batting_team_by_half() {
        assert_eq!(HalfInning::from_is_top(true).batting_team(), Team::Away);
        assert_eq!(HalfInning::from_is_top(false).batting_team(), Team::Home);
    }

    #[test]
    fn test_differential_is_relative_to_team() {
        let score = ScoreState::new(2, 5);
        assert_eq!(score.differential(Team::Away), -3);
        assert_eq!(score.differential(Team::Home), 3);
        assert_eq!(score.leader(), Some(Team::Home));
        assert_eq!(ScoreState::new(4, 4).leader(), None);
    }
}
