use crate::reports;
use clap::Args;
use taverna::audit::audit_schema;
use taverna::config::Config;
use taverna::error::{ScoreError, ScoreResult};
use taverna::scoring::ScoringTable;
use taverna::store::ScoreboardStore;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(config: &Config, table: &ScoringTable) -> ScoreResult<()> {
    let mut store = ScoreboardStore::open(config);
    let snapshot = store.snapshot()?;
    let report = audit_schema(
        &snapshot,
        store.layout(),
        &config.roster.get_players(),
        table.games(),
    );

    println!("\n🔎 === SCOREBOARD CHECK === 🔎");
    reports::print_schema_report(&report);

    if report.is_clean() {
        info!("✅ Scoreboard layout matches the roster and game catalog");
        Ok(())
    } else {
        Err(ScoreError::Config(
            "Scoreboard layout does not match the roster and game catalog".into(),
        ))
    }
}
