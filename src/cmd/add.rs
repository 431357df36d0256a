use clap::Args;
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use taverna::config::Config;
use taverna::error::{ScoreError, ScoreResult};
use taverna::prompt::TerminalPrompt;
use taverna::scoring::{Game, PlayerCount, Position, ScoringTable};
use taverna::session::{Confirmer, Notifier};
use taverna::store::ScoreboardStore;
use taverna::update::{ScoreRequest, ScoreUpdateService};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[command(flatten)]
    pub config: Config,

    /// Player name, as listed in the roster
    #[arg(long)]
    pub player: String,

    /// Game name, e.g. "Ticket to Ride"
    #[arg(long)]
    pub game: String,

    /// How many people played
    #[arg(long)]
    pub table_size: u8,

    /// Final place (1 = winner)
    #[arg(long)]
    pub position: u8,

    /// Skip the confirmation prompt
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,
}

fn parse_game(name: &str) -> ScoreResult<Game> {
    Game::from_str(name.trim()).map_err(|_| {
        let known: Vec<String> = Game::iter().map(|g| g.to_string()).collect();
        ScoreError::Config(format!(
            "Unknown game '{}'. Known games: {}",
            name,
            known.join(", ")
        ))
    })
}

pub fn run(args: &AddArgs, config: &Config, table: Arc<ScoringTable>) -> ScoreResult<()> {
    let roster = config.roster.get_players();
    if !roster.iter().any(|p| p == args.player.trim()) {
        return Err(ScoreError::Config(format!(
            "Player '{}' is not on the roster",
            args.player
        )));
    }

    let request = ScoreRequest {
        player: args.player.trim().to_string(),
        game: parse_game(&args.game)?,
        players: PlayerCount(args.table_size),
        position: Position(args.position),
    };

    let mut ui = TerminalPrompt::stdio();
    if !args.yes && !ui.confirm(&request.to_string()) {
        info!("❌ Operation cancelled by the operator");
        return Ok(());
    }

    let mut store = ScoreboardStore::open(config);
    let service = ScoreUpdateService::new(table);
    match service.apply(&mut store, &request, service.table().games()) {
        Ok(_) => {
            ui.notify_success();
            Ok(())
        }
        Err(e) => {
            ui.notify_error(&e.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_names_parse_by_display_label() {
        assert_eq!(parse_game("Ticket to Ride").unwrap(), Game::TicketToRide);
        assert_eq!(parse_game(" 7 Wonders ").unwrap(), Game::SevenWonders);
        assert!(matches!(parse_game("Chess"), Err(ScoreError::Config(_))));
    }
}
