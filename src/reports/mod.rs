use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use taverna::audit::SchemaReport;
use taverna::scoring::{Game, ScoringTable};
use taverna::standings::StandingRow;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per (game, table size); one column per finishing place.
pub fn print_scoring_table(scoring: &ScoringTable, filter: Option<&str>) {
    let games: Vec<Game> = scoring
        .games()
        .iter()
        .copied()
        .filter(|g| match filter {
            Some(f) => g.to_string().to_lowercase().contains(&f.to_lowercase()),
            None => true,
        })
        .collect();

    if games.is_empty() {
        println!("⚠️  No game matches '{}'", filter.unwrap_or_default());
        return;
    }

    let places = games
        .iter()
        .map(|&g| scoring.valid_positions(g).len())
        .max()
        .unwrap_or(0);

    let mut table = new_table();
    let mut header = vec![
        Cell::new("Jogo").add_attribute(Attribute::Bold),
        Cell::new("Jogadores"),
    ];
    for p in 1..=places {
        header.push(Cell::new(format!("{}º", p)).fg(if p == 1 { Color::Green } else { Color::Reset }));
    }
    table.set_header(header);

    for game in games {
        for &players in scoring.valid_player_counts(game) {
            let mut row = vec![
                Cell::new(game.to_string()).add_attribute(Attribute::Bold),
                Cell::new(players.0),
            ];
            for &position in scoring.valid_positions(game) {
                let cell = match scoring.points(game, players, position) {
                    Ok(0) => Cell::new("0").fg(Color::DarkGrey),
                    Ok(v) => Cell::new(v),
                    Err(_) => Cell::new("-").fg(Color::DarkGrey),
                };
                row.push(cell);
            }
            table.add_row(row);
        }
    }

    for i in 1..=places + 1 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_standings(rows: &[StandingRow], games: &[Game]) {
    if rows.is_empty() {
        println!("⚠️  The scoreboard has no players yet");
        return;
    }

    let mut table = new_table();
    let mut header = vec![
        Cell::new("#"),
        Cell::new("Jogador").add_attribute(Attribute::Bold),
    ];
    header.extend(games.iter().map(|g| Cell::new(g.to_string())));
    header.push(Cell::new("Total").fg(Color::Cyan));
    header.push(Cell::new("Planilha"));
    table.set_header(header);

    for (rank, r) in rows.iter().enumerate() {
        let mut row = vec![
            Cell::new(rank + 1),
            Cell::new(&r.player).add_attribute(Attribute::Bold),
        ];
        row.extend(r.per_game.iter().map(|&(_, v)| Cell::new(v)));
        row.push(
            Cell::new(r.computed_total)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        );
        row.push(match r.recorded_total {
            Some(v) if r.is_consistent() => Cell::new(v),
            Some(v) => Cell::new(format!("{} ≠", v)).fg(Color::Red),
            None => Cell::new("-").fg(Color::DarkGrey),
        });
        table.add_row(row);
    }

    for i in 2..=games.len() + 3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_schema_report(report: &SchemaReport) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Check").add_attribute(Attribute::Bold),
        Cell::new("Result"),
    ]);

    let ok = || Cell::new("ok").fg(Color::Green);
    let flag = |text: String| Cell::new(text).fg(Color::Red);
    let list = |items: Vec<String>| {
        if items.is_empty() {
            ok()
        } else {
            flag(items.join(", "))
        }
    };

    table.add_row(vec![
        Cell::new("Player header"),
        if report.player_header_missing {
            flag("missing".into())
        } else {
            ok()
        },
    ]);
    table.add_row(vec![
        Cell::new("Total column"),
        if report.total_missing {
            flag("missing".into())
        } else {
            ok()
        },
    ]);
    table.add_row(vec![
        Cell::new("Roster players without a row"),
        list(report.missing_players.clone()),
    ]);
    table.add_row(vec![
        Cell::new("Games without a column"),
        list(report.missing_games.iter().map(|g| g.to_string()).collect()),
    ]);
    table.add_row(vec![
        Cell::new("Rows not on the roster"),
        if report.extra_players.is_empty() {
            Cell::new("none")
        } else {
            Cell::new(report.extra_players.join(", ")).fg(Color::Yellow)
        },
    ]);

    println!("\n{}", table);
}
