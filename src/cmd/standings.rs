use crate::reports;
use clap::Args;
use taverna::config::Config;
use taverna::error::ScoreResult;
use taverna::scoring::ScoringTable;
use taverna::standings::compute_standings;
use taverna::store::ScoreboardStore;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct StandingsArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(config: &Config, table: &ScoringTable) -> ScoreResult<()> {
    let mut store = ScoreboardStore::open(config);
    let snapshot = store.snapshot()?;
    let rows = compute_standings(&snapshot, store.layout(), table.games())?;

    println!("\n📊 === STANDINGS === 📊");
    reports::print_standings(&rows, table.games());

    let drifted = rows.iter().filter(|r| !r.is_consistent()).count();
    if drifted > 0 {
        warn!(
            "⚠️  {} recorded total(s) differ from the sum of the game columns",
            drifted
        );
    }
    Ok(())
}
