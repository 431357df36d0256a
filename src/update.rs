use crate::error::{ScoreError, ScoreResult};
use crate::scoring::{Game, PlayerCount, Position, ScoringTable};
use crate::store::{RowHandle, ScoreboardStore};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// One scoring event as collected from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRequest {
    pub player: String,
    pub game: Game,
    pub players: PlayerCount,
    pub position: Position,
}

impl fmt::Display for ScoreRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.player, self.game, self.players, self.position
        )
    }
}

/// What a successful `apply` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedScore {
    pub player: String,
    pub game: Game,
    pub delta: u32,
    pub previous: u32,
    pub updated: u32,
    pub total: u32,
}

/// Applies scoring events to the scoreboard.
///
/// The game cell is updated with an unguarded read-modify-write and the
/// total is recomputed afterwards. The two writes are not atomic: if the
/// total write fails the game cell keeps its new value and the caller gets
/// [`ScoreError::TotalNotUpdated`]. Nothing is retried or rolled back.
/// A second operator writing the same sheet concurrently can lose updates.
pub struct ScoreUpdateService {
    table: Arc<ScoringTable>,
}

impl ScoreUpdateService {
    pub fn new(table: Arc<ScoringTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    pub fn apply(
        &self,
        store: &mut ScoreboardStore,
        request: &ScoreRequest,
        all_games: &[Game],
    ) -> ScoreResult<AppliedScore> {
        store.ensure_connected()?;

        // 1. Resolve points; nothing touches the store on a miss
        let delta = self
            .table
            .points(request.game, request.players, request.position)?;
        if delta == 0 {
            return Err(ScoreError::ZeroAward {
                game: request.game,
                players: request.players.to_string(),
                position: request.position.to_string(),
            });
        }

        // 2. Row
        let row = store
            .find_row(&request.player)?
            .ok_or_else(|| ScoreError::UnknownPlayer(request.player.clone()))?;

        // 3. Game column
        let game_name = request.game.to_string();
        let column = store
            .find_column(&game_name)?
            .ok_or_else(|| ScoreError::UnknownGameColumn(game_name.clone()))?;

        // 4. Read-modify-write
        let previous = store.read_cell(row, column)?;
        let updated = previous.saturating_add(delta);
        store.write_cell(row, column, updated)?;

        // 5. Total
        let total = recompute_total(store, row, all_games).map_err(|e| {
            warn!(
                "⚠️  {} now holds {} for {}, but the total was not recomputed: {}",
                game_name, updated, request.player, e
            );
            ScoreError::TotalNotUpdated {
                game_value: updated,
                reason: e.to_string(),
            }
        })?;

        info!(
            "✅ Score updated: {} +{} in {} ({} → {}, total {})",
            request.player, delta, game_name, previous, updated, total
        );

        Ok(AppliedScore {
            player: request.player.clone(),
            game: request.game,
            delta,
            previous,
            updated,
            total,
        })
    }
}

/// Sums every readable game column of the row and writes the Total cell.
/// Missing game columns are skipped.
fn recompute_total(
    store: &mut ScoreboardStore,
    row: RowHandle,
    all_games: &[Game],
) -> ScoreResult<u32> {
    let snapshot = store.snapshot()?;

    let mut total: u32 = 0;
    for game in all_games {
        match snapshot.find_column(&game.to_string()) {
            Some(column) => {
                total = total.saturating_add(store.read_cell(row, column)?);
            }
            None => warn!("⚠️  Column '{}' missing; left out of the total", game),
        }
    }

    let total_name = store.layout().total_column.clone();
    let total_column = snapshot
        .find_column(&total_name)
        .ok_or_else(|| ScoreError::UnknownGameColumn(total_name))?;
    store.write_cell(row, total_column, total)?;
    Ok(total)
}
