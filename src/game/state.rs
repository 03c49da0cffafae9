use serde::{Deserialize, Serialize};

/// Which screen the engine is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// Points needed to take a match. Only the three advertised modes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MatchLength {
    BestOf3,
    #[default]
    BestOf5,
    BestOf7,
}

impl MatchLength {
    pub fn all() -> [MatchLength; 3] {
        [MatchLength::BestOf3, MatchLength::BestOf5, MatchLength::BestOf7]
    }

    pub fn winning_score(self) -> u32 {
        match self {
            MatchLength::BestOf3 => 3,
            MatchLength::BestOf5 => 5,
            MatchLength::BestOf7 => 7,
        }
    }

    /// The digit key that selects this mode
    pub fn key(self) -> char {
        match self {
            MatchLength::BestOf3 => '3',
            MatchLength::BestOf5 => '5',
            MatchLength::BestOf7 => '7',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::all().into_iter().find(|mode| mode.key() == c)
    }

    pub fn display_text(self) -> String {
        format!("Best of {}", self.winning_score())
    }
}

impl TryFrom<u32> for MatchLength {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(MatchLength::BestOf3),
            5 => Ok(MatchLength::BestOf5),
            7 => Ok(MatchLength::BestOf7),
            other => Err(format!("winning score must be 3, 5 or 7 (got {other})")),
        }
    }
}

impl From<MatchLength> for u32 {
    fn from(length: MatchLength) -> Self {
        length.winning_score()
    }
}
