//! The operator-facing flow: pick player, game, table size and place,
//! confirm, then hand the request to the update service.
//!
//! All interaction goes through the [`Selector`], [`Confirmer`] and
//! [`Notifier`] capabilities so the flow runs unchanged against a terminal
//! or a scripted fake.

use crate::error::ScoreError;
use crate::scoring::{Game, PlayerCount, Position};
use crate::store::ScoreboardStore;
use crate::update::{AppliedScore, ScoreRequest, ScoreUpdateService};
use std::fmt::Display;
use tracing::{info, warn};

pub const MENU_TITLE: &str = "Menu Principal - Sistema de Pontuação";
pub const MENU_ADD: &str = "Adicionar Pontuação";
pub const MENU_EXIT: &str = "Sair do Sistema";

const TITLE_PLAYER: &str = "Selecione o jogador";
const TITLE_GAME: &str = "Selecione o jogo";
const TITLE_COUNT: &str = "Selecione o número de jogadores que participaram";
const TITLE_POSITION: &str = "Selecione a posição final no jogo";
const LABEL_CONFIRM: &str = "Confirmar";
const LABEL_SELECT: &str = "Selecionar";

pub trait Selector {
    /// One of `options`, or `None` when the operator cancels.
    fn ask(&mut self, title: &str, prompt_label: &str, options: &[String]) -> Option<String>;
}

pub trait Confirmer {
    fn confirm(&mut self, summary: &str) -> bool;
}

pub trait Notifier {
    fn notify_success(&mut self);
    fn notify_error(&mut self, message: &str);
}

pub trait Prompter: Selector + Confirmer + Notifier {}
impl<T: Selector + Confirmer + Notifier + ?Sized> Prompter for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    SelectPlayer,
    SelectGame,
    SelectPlayerCount,
    SelectPosition,
    Confirm,
    Dispatch,
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// Cancelled or declined; nothing was written.
    Aborted(SessionStep),
    Done(AppliedScore),
    Failed(ScoreError),
}

enum State {
    SelectPlayer,
    SelectGame {
        player: String,
    },
    SelectPlayerCount {
        player: String,
        game: Game,
    },
    SelectPosition {
        player: String,
        game: Game,
        players: PlayerCount,
    },
    Confirm(ScoreRequest),
    Dispatch(ScoreRequest),
    Finished(SessionOutcome),
}

/// Counts per outcome for one menu session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuSummary {
    pub recorded: usize,
    pub failed: usize,
    pub aborted: usize,
}

pub struct SessionFlow {
    roster: Vec<String>,
    games: Vec<Game>,
    service: ScoreUpdateService,
}

impl SessionFlow {
    pub fn new(roster: Vec<String>, service: ScoreUpdateService) -> Self {
        let games = service.table().games().to_vec();
        Self {
            roster,
            games,
            service,
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Runs one transaction to a terminal outcome.
    pub fn run<P: Prompter + ?Sized>(
        &self,
        ui: &mut P,
        store: &mut ScoreboardStore,
    ) -> SessionOutcome {
        let table = self.service.table();
        let mut state = State::SelectPlayer;

        loop {
            state = match state {
                State::SelectPlayer => match choose(ui, TITLE_PLAYER, &self.roster) {
                    Some(player) => State::SelectGame { player },
                    None => State::Finished(SessionOutcome::Aborted(SessionStep::SelectPlayer)),
                },

                State::SelectGame { player } => match choose(ui, TITLE_GAME, &self.games) {
                    Some(game) => State::SelectPlayerCount { player, game },
                    None => State::Finished(SessionOutcome::Aborted(SessionStep::SelectGame)),
                },

                State::SelectPlayerCount { player, game } => {
                    let counts = table.valid_player_counts(game);
                    if counts.is_empty() {
                        State::Finished(fail(
                            ui,
                            ScoreError::Config(format!("No player counts configured for {}", game)),
                        ))
                    } else {
                        match choose(ui, TITLE_COUNT, counts) {
                            Some(players) => State::SelectPosition {
                                player,
                                game,
                                players,
                            },
                            None => State::Finished(SessionOutcome::Aborted(
                                SessionStep::SelectPlayerCount,
                            )),
                        }
                    }
                }

                State::SelectPosition {
                    player,
                    game,
                    players,
                } => {
                    let positions = table.valid_positions(game);
                    if positions.is_empty() {
                        State::Finished(fail(
                            ui,
                            ScoreError::Config(format!("No positions configured for {}", game)),
                        ))
                    } else {
                        match choose::<Position, _>(ui, TITLE_POSITION, positions) {
                            Some(position) => State::Confirm(ScoreRequest {
                                player,
                                game,
                                players,
                                position,
                            }),
                            None => State::Finished(SessionOutcome::Aborted(
                                SessionStep::SelectPosition,
                            )),
                        }
                    }
                }

                State::Confirm(request) => {
                    if ui.confirm(&request.to_string()) {
                        State::Dispatch(request)
                    } else {
                        info!("❌ Operation cancelled by the operator");
                        State::Finished(SessionOutcome::Aborted(SessionStep::Confirm))
                    }
                }

                State::Dispatch(request) => {
                    match self.service.apply(store, &request, &self.games) {
                        Ok(applied) => {
                            ui.notify_success();
                            State::Finished(SessionOutcome::Done(applied))
                        }
                        Err(e) => State::Finished(fail(ui, e)),
                    }
                }

                State::Finished(outcome) => return outcome,
            };
        }
    }

    /// Top-level menu; returns when the operator exits or cancels.
    pub fn run_menu<P: Prompter + ?Sized>(
        &self,
        ui: &mut P,
        store: &mut ScoreboardStore,
    ) -> MenuSummary {
        let options = [MENU_ADD.to_string(), MENU_EXIT.to_string()];
        let mut summary = MenuSummary::default();

        loop {
            match ui.ask(MENU_TITLE, LABEL_SELECT, &options).as_deref() {
                Some(MENU_ADD) => match self.run(ui, store) {
                    SessionOutcome::Done(_) => summary.recorded += 1,
                    SessionOutcome::Failed(_) => summary.failed += 1,
                    SessionOutcome::Aborted(_) => summary.aborted += 1,
                },
                Some(MENU_EXIT) | None => {
                    info!("👋 Leaving the scoreboard");
                    return summary;
                }
                Some(other) => warn!("⚠️  Invalid option '{}'", other),
            }
        }
    }
}

/// Presents `options` by label and maps the answer back. An answer that is not
/// one of the offered labels counts as a cancel.
fn choose<T, P>(ui: &mut P, title: &str, options: &[T]) -> Option<T>
where
    T: Clone + Display,
    P: Selector + ?Sized,
{
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let answer = ui.ask(title, LABEL_CONFIRM, &labels)?;
    match labels.iter().position(|l| *l == answer) {
        Some(i) => Some(options[i].clone()),
        None => {
            warn!("⚠️  '{}' is not one of the offered options", answer);
            None
        }
    }
}

fn fail<P: Notifier + ?Sized>(ui: &mut P, e: ScoreError) -> SessionOutcome {
    warn!("❌ {}", e);
    ui.notify_error(&e.to_string());
    SessionOutcome::Failed(e)
}
