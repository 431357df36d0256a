use crate::reports;
use clap::Args;
use taverna::scoring::ScoringTable;

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Only show games whose name contains this text
    #[arg(short, long)]
    pub game: Option<String>,
}

pub fn run(args: &TableArgs, table: &ScoringTable) {
    println!("\n🏆 === SCORING TABLE === 🏆");
    reports::print_scoring_table(table, args.game.as_deref());
}
