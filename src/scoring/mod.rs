pub mod buckets;
pub mod table;

pub use self::buckets::{BucketParseError, Game, PlayerCount, Position};
pub use self::table::TABLE_VERSION;

use crate::error::{ScoreError, ScoreResult};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoringKey {
    pub game: Game,
    pub players: PlayerCount,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEntry {
    pub key: ScoringKey,
    pub points: u32,
}

impl ScoringEntry {
    pub fn new(game: Game, players: u8, position: u8, points: u32) -> Self {
        Self {
            key: ScoringKey {
                game,
                players: PlayerCount(players),
                position: Position(position),
            },
            points,
        }
    }
}

/// No entry exists for the requested combination. Distinct from a configured zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no scoring entry for {game} / {players} / {position}")]
pub struct LookupMiss {
    pub game: String,
    pub players: String,
    pub position: String,
}

impl LookupMiss {
    fn of(game: impl ToString, players: impl ToString, position: impl ToString) -> Self {
        Self {
            game: game.to_string(),
            players: players.to_string(),
            position: position.to_string(),
        }
    }
}

/// Immutable (game × player count × position) → points table.
#[derive(Debug, Clone, Default)]
pub struct ScoringTable {
    points: BTreeMap<ScoringKey, u32>,
    games: Vec<Game>,
    counts: BTreeMap<Game, Vec<PlayerCount>>,
    positions: BTreeMap<Game, Vec<Position>>,
}

impl ScoringTable {
    /// The reference competition table compiled into the binary.
    pub fn embedded() -> Self {
        let entries = table::EMBEDDED_ROWS.iter().flat_map(|row| {
            row.awards.iter().enumerate().map(move |(i, &points)| {
                ScoringEntry::new(row.game, row.players, (i + 1) as u8, points)
            })
        });
        Self::from_entries(entries)
    }

    pub fn from_entries<I: IntoIterator<Item = ScoringEntry>>(entries: I) -> Self {
        let mut points = BTreeMap::new();
        let mut counts: BTreeMap<Game, BTreeSet<PlayerCount>> = BTreeMap::new();
        let mut positions: BTreeMap<Game, BTreeSet<Position>> = BTreeMap::new();

        for entry in entries {
            let key = entry.key;
            points.insert(key, entry.points);
            counts.entry(key.game).or_default().insert(key.players);
            positions.entry(key.game).or_default().insert(key.position);
        }

        Self {
            points,
            games: counts.keys().copied().collect(),
            counts: counts
                .into_iter()
                .map(|(g, set)| (g, set.into_iter().collect()))
                .collect(),
            positions: positions
                .into_iter()
                .map(|(g, set)| (g, set.into_iter().collect()))
                .collect(),
        }
    }

    /// Games with at least one entry, in catalog order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn valid_player_counts(&self, game: Game) -> &[PlayerCount] {
        self.counts.get(&game).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn valid_positions(&self, game: Game) -> &[Position] {
        self.positions.get(&game).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn points(
        &self,
        game: Game,
        players: PlayerCount,
        position: Position,
    ) -> Result<u32, LookupMiss> {
        let key = ScoringKey {
            game,
            players,
            position,
        };
        self.points
            .get(&key)
            .copied()
            .ok_or_else(|| LookupMiss::of(game, players, position))
    }

    /// Lookup from raw labels. Unparseable labels are misses, never zero.
    pub fn points_by_label(
        &self,
        game: &str,
        players: &str,
        position: &str,
    ) -> Result<u32, LookupMiss> {
        let miss = || LookupMiss::of(game, players, position);
        let game: Game = game.parse().map_err(|_| miss())?;
        let players: PlayerCount = players.parse().map_err(|_| miss())?;
        let position: Position = position.parse().map_err(|_| miss())?;
        self.points(game, players, position)
    }

    pub fn entries(&self) -> impl Iterator<Item = ScoringEntry> + '_ {
        self.points
            .iter()
            .map(|(&key, &points)| ScoringEntry { key, points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every listed bucket must carry a 1st-place award.
    pub fn validate(&self) -> ScoreResult<()> {
        if self.is_empty() {
            return Err(ScoreError::Config("Scoring table is empty".into()));
        }

        for (&game, counts) in &self.counts {
            for &players in counts {
                match self.points(game, players, Position(1)) {
                    Ok(p) if p > 0 => {}
                    Ok(_) => {
                        return Err(ScoreError::Config(format!(
                            "{} / {} awards nothing for 1st place",
                            game, players
                        )))
                    }
                    Err(miss) => return Err(ScoreError::Config(miss.to_string())),
                }
            }
        }

        Ok(())
    }
}
