use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A round whose completion triggers a qualification recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Round {
    #[serde(rename = "PRELIM_1")]
    Prelim1,
    #[serde(rename = "PRELIM_2")]
    Prelim2,
    #[serde(rename = "PRELIM_3")]
    Prelim3,
    Intermediate,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid round identifier: {0}")]
pub struct InvalidRoundError(pub String);

impl Round {
    pub const ALL: [Round; 5] = [
        Round::Prelim1,
        Round::Prelim2,
        Round::Prelim3,
        Round::Intermediate,
        Round::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prelim1 => "PRELIM_1",
            Self::Prelim2 => "PRELIM_2",
            Self::Prelim3 => "PRELIM_3",
            Self::Intermediate => "INTERMEDIATE",
            Self::Final => "FINAL",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = InvalidRoundError;

    /// Accepts the canonical names as well as the short codes printed on the
    /// event run sheets (`VR1`..`VR3` for the preliminaries, `ZR` for the
    /// intermediate round).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRELIM_1" | "PRELIM1" | "VR1" => Ok(Self::Prelim1),
            "PRELIM_2" | "PRELIM2" | "VR2" => Ok(Self::Prelim2),
            "PRELIM_3" | "PRELIM3" | "VR3" => Ok(Self::Prelim3),
            "INTERMEDIATE" | "ZR" => Ok(Self::Intermediate),
            "FINAL" => Ok(Self::Final),
            _ => Err(InvalidRoundError(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Round {
    type Error = InvalidRoundError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Competition stage a ride time belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preliminary,
    Intermediate,
    Final,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_parsing() {
        assert_eq!("PRELIM_1".parse::<Round>().unwrap(), Round::Prelim1);
        assert_eq!("prelim_2".parse::<Round>().unwrap(), Round::Prelim2);
        assert_eq!(Round::try_from("VR3").unwrap(), Round::Prelim3);
        assert_eq!("zr".parse::<Round>().unwrap(), Round::Intermediate);
        assert_eq!("INTERMEDIATE".parse::<Round>().unwrap(), Round::Intermediate);
        assert_eq!("Final".parse::<Round>().unwrap(), Round::Final);
    }

    #[test]
    fn test_unknown_round_is_rejected() {
        let err = "BOGUS".parse::<Round>().unwrap_err();
        assert_eq!(err, InvalidRoundError("BOGUS".to_string()));
        assert!(Round::try_from("").is_err());
        assert!(Round::try_from("PRELIM_4").is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for round in Round::ALL {
            assert_eq!(round.to_string().parse::<Round>().unwrap(), round);
        }
    }
}
