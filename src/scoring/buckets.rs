use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// The closed game catalog. Display and parse strings are the scoreboard column names.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Game {
    #[strum(to_string = "Exploding Kittens")]
    ExplodingKittens,
    #[strum(to_string = "Halli Galli")]
    HalliGalli,
    #[strum(to_string = "Saco de Ossos")]
    SacoDeOssos,
    #[strum(to_string = "Futebol de Moeda")]
    FutebolDeMoeda,
    #[strum(to_string = "Ticket to Ride")]
    TicketToRide,
    #[strum(to_string = "King of Tokyo")]
    KingOfTokyo,
    #[strum(to_string = "Paper Town")]
    PaperTown,
    #[strum(to_string = "Abstratus")]
    Abstratus,
    #[strum(to_string = "Imagine")]
    Imagine,
    #[strum(to_string = "Mille Fiori")]
    MilleFiori,
    #[strum(to_string = "7 Wonders")]
    SevenWonders,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{label}' is not a valid {kind} label")]
pub struct BucketParseError {
    pub kind: &'static str,
    pub label: String,
}

const PLAYERS_SUFFIX: &str = "jogadores";
const POSITION_SUFFIX: &str = "lugar";

/// How many people sat at the table, e.g. "4 jogadores".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerCount(pub u8);

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, PLAYERS_SUFFIX)
    }
}

impl FromStr for PlayerCount {
    type Err = BucketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || BucketParseError {
            kind: "player count",
            label: s.to_string(),
        };

        let mut parts = s.split_whitespace();
        let n: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        match (parts.next(), parts.next()) {
            (Some(PLAYERS_SUFFIX), None) if n > 0 => Ok(PlayerCount(n)),
            _ => Err(err()),
        }
    }
}

/// Finishing place, e.g. "1º lugar".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(pub u8);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}º {}", self.0, POSITION_SUFFIX)
    }
}

impl FromStr for Position {
    type Err = BucketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || BucketParseError {
            kind: "position",
            label: s.to_string(),
        };

        let mut parts = s.split_whitespace();
        let ordinal = parts.next().ok_or_else(err)?;
        let digits = ordinal.trim_end_matches(&['º', 'o', '°'][..]);
        let n: u8 = digits.parse().map_err(|_| err())?;
        match (parts.next(), parts.next()) {
            (Some(POSITION_SUFFIX), None) if n > 0 => Ok(Position(n)),
            _ => Err(err()),
        }
    }
}
