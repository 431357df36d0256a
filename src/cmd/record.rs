use clap::Args;
use std::sync::Arc;
use taverna::audit::audit_schema;
use taverna::config::Config;
use taverna::error::ScoreResult;
use taverna::prompt::TerminalPrompt;
use taverna::scoring::ScoringTable;
use taverna::session::SessionFlow;
use taverna::store::ScoreboardStore;
use taverna::update::ScoreUpdateService;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(config: &Config, table: Arc<ScoringTable>) -> ScoreResult<()> {
    println!("🎲 Sistema de Pontuação - Competição de Jogos");
    println!("{}", "=".repeat(50));

    let mut store = ScoreboardStore::open(config);
    let roster = config.roster.get_players();

    // Layout drift is reported up front; each transaction still fails on its own.
    if store.is_connected() {
        match store.snapshot() {
            Ok(snapshot) => {
                let report = audit_schema(&snapshot, store.layout(), &roster, table.games());
                if !report.is_clean() {
                    warn!("⚠️  Scoreboard layout differs from the roster/catalog. Run `taverna check` for details.");
                }
            }
            Err(e) => warn!("⚠️  Could not inspect the scoreboard: {}", e),
        }
    }

    let flow = SessionFlow::new(roster, ScoreUpdateService::new(table));
    let mut ui = TerminalPrompt::stdio();
    let summary = flow.run_menu(&mut ui, &mut store);

    let stats = store.stats();
    info!(
        "📊 Session closed: {} recorded, {} failed, {} cancelled ({} reads, {} writes)",
        summary.recorded, summary.failed, summary.aborted, stats.reads, stats.writes
    );
    Ok(())
}
