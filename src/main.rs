use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use std::sync::Arc;
use taverna::config::Config;
use taverna::scoring::{ScoringTable, TABLE_VERSION};
use tracing::{debug, error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score keeper for the tavern game league", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive scoring menu
    Record(cmd::record::RecordArgs),
    /// Record a single result without the menu
    Add(cmd::add::AddArgs),
    /// Print the scoring table
    Table(cmd::table::TableArgs),
    /// Print the current standings
    Standings(cmd::standings::StandingsArgs),
    /// Compare the scoreboard layout with the roster and game catalog
    Check(cmd::check::CheckArgs),
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// File config is the base; explicit CLI flags win.
fn resolve_config(path: &Option<String>, cli_config: &Config, sub_matches: &ArgMatches) -> Config {
    let mut config = match path {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.roster.validate() {
        error!("{}", e);
        process::exit(1);
    }
    config.roster.players = config.roster.get_players().join(",");
    config
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let table = ScoringTable::embedded();
    if let Err(e) = table.validate() {
        error!("❌ Embedded scoring table is inconsistent: {}", e);
        process::exit(1);
    }
    debug!(
        "Scoring table v{} loaded ({} entries)",
        TABLE_VERSION,
        table.len()
    );
    let table = Arc::new(table);

    let (cli_config, sub_name) = match &cli.command {
        Commands::Record(args) => (&args.config, "record"),
        Commands::Add(args) => (&args.config, "add"),
        Commands::Standings(args) => (&args.config, "standings"),
        Commands::Check(args) => (&args.config, "check"),
        Commands::Table(args) => {
            cmd::table::run(args, &table);
            return;
        }
    };

    let sub_matches = matches
        .subcommand_matches(sub_name)
        .unwrap_or_else(|| unreachable!("clap parsed '{}'", sub_name));
    let config = resolve_config(&cli.config, cli_config, sub_matches);

    let result = match &cli.command {
        Commands::Record(_) => cmd::record::run(&config, table),
        Commands::Add(args) => cmd::add::run(args, &config, table),
        Commands::Standings(_) => cmd::standings::run(&config, &table),
        Commands::Check(_) => cmd::check::run(&config, &table),
        Commands::Table(_) => Ok(()),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
