use super::buckets::Game;

/// Bumped whenever the award values below change.
pub const TABLE_VERSION: u32 = 3;

/// One player-count bucket of a game: awards indexed by finishing place (1º first).
pub struct TableRow {
    pub game: Game,
    pub players: u8,
    pub awards: &'static [u32],
}

const fn row(game: Game, players: u8, awards: &'static [u32]) -> TableRow {
    TableRow {
        game,
        players,
        awards,
    }
}

// Rows are listed in catalog order, buckets ascending.
pub const EMBEDDED_ROWS: &[TableRow] = &[
    // Party / quick games: winner takes all
    row(Game::ExplodingKittens, 3, &[10]),
    row(Game::ExplodingKittens, 4, &[12]),
    row(Game::ExplodingKittens, 5, &[15]),
    row(Game::HalliGalli, 4, &[10]),
    row(Game::HalliGalli, 5, &[12]),
    row(Game::HalliGalli, 6, &[15]),
    // Duels
    row(Game::SacoDeOssos, 2, &[3]),
    row(Game::FutebolDeMoeda, 2, &[3]),
    // Podium games
    row(Game::TicketToRide, 3, &[60, 30, 20]),
    row(Game::TicketToRide, 4, &[70, 35, 23]),
    row(Game::TicketToRide, 5, &[80, 40, 26]),
    row(Game::KingOfTokyo, 4, &[60, 30, 20]),
    row(Game::KingOfTokyo, 5, &[70, 35, 23]),
    row(Game::KingOfTokyo, 6, &[80, 40, 26]),
    row(Game::PaperTown, 3, &[40, 20, 0]),
    row(Game::PaperTown, 4, &[50, 25, 13]),
    row(Game::Abstratus, 3, &[40, 20, 0]),
    row(Game::Abstratus, 4, &[50, 25, 13]),
    row(Game::Imagine, 6, &[40, 20, 13]),
    row(Game::Imagine, 7, &[50, 25, 16]),
    row(Game::Imagine, 8, &[60, 30, 20]),
    row(Game::MilleFiori, 4, &[100, 50, 33]),
    row(Game::SevenWonders, 5, &[70, 35, 23]),
    row(Game::SevenWonders, 6, &[85, 42, 28]),
    row(Game::SevenWonders, 7, &[100, 50, 33]),
];
