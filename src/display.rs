use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::analysis::HandAnalysis;
use crate::cards::{Card, Suit};
use crate::live::CategoryShare;
use crate::simulation::SimResult;
use crate::streets::StreetEquity;

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = ((equity.clamp(0.0, 1.0)) * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);

    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn card_display(card: Card) -> String {
    let text = card.pretty();
    match card.suit() {
        Suit::Spades => text.white().to_string(),
        Suit::Hearts => text.red().to_string(),
        Suit::Diamonds => text.blue().to_string(),
        Suit::Clubs => text.green().to_string(),
    }
}

pub fn board_display(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(none)".dimmed().to_string();
    }
    cards
        .iter()
        .map(|&card| card_display(card))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn result_table(result: &SimResult) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Outcome").set_alignment(CellAlignment::Left),
        Cell::new("Count").set_alignment(CellAlignment::Right),
        Cell::new("Rate").set_alignment(CellAlignment::Right),
    ]);

    let rows = [
        ("Win", result.wins, result.win_rate()),
        ("Tie", result.ties, result.tie_rate()),
        ("Lose", result.losses, result.loss_rate()),
    ];
    for (label, count, rate) in rows {
        table.add_row(vec![
            Cell::new(label.bold().to_string()),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", rate * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold().to_string()),
        Cell::new(result.total).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);

    table.to_string()
}

pub fn street_table(streets: &[StreetEquity]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Street"),
        Cell::new("Board").set_alignment(CellAlignment::Right),
        Cell::new("Win").set_alignment(CellAlignment::Right),
        Cell::new("Tie").set_alignment(CellAlignment::Right),
        Cell::new("Lose").set_alignment(CellAlignment::Right),
        Cell::new("Equity"),
    ]);

    for s in streets {
        table.add_row(vec![
            Cell::new(s.street.as_str().bold().to_string()),
            Cell::new(s.board_len).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", s.win_pct * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", s.tie_pct * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", s.loss_pct * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(equity_bar(s.equity, 20)),
        ]);
    }

    table.to_string()
}

pub fn distribution_table(distribution: &[CategoryShare]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hand"),
        Cell::new("Share").set_alignment(CellAlignment::Right),
    ]);
    for share in distribution {
        table.add_row(vec![
            Cell::new(share.category.name()),
            Cell::new(format!("{:.1}%", share.share * 100.0)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn analysis_lines(analysis: &HandAnalysis) -> Vec<String> {
    let mut lines = Vec::new();
    match analysis.current {
        Some(key) => lines.push(format!("Hand:  {}", key.describe().bold())),
        None => lines.push(format!("Hand:  {}", analysis.hand_name().dimmed())),
    }
    if !analysis.hands_that_beat.is_empty() {
        let names: Vec<&str> = analysis.hands_that_beat.iter().map(|c| c.name()).collect();
        lines.push(format!("Beaten by:  {}", names.join(", ")));
    }
    if analysis.draws.is_empty() {
        lines.push(format!("Draws:  {}", "none".dimmed()));
    } else {
        let draws: Vec<String> = analysis.draws.iter().map(|d| d.to_string()).collect();
        lines.push(format!("Draws:  {}", draws.join(", ").cyan()));
    }
    lines
}

pub fn styled_action(action: &str) -> String {
    if action.eq_ignore_ascii_case("bet") {
        action.red().bold().to_string()
    } else if action.to_uppercase().contains("CHECK") {
        action.yellow().bold().to_string()
    } else {
        action.bold().to_string()
    }
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    for line in content.lines() {
        println!("  {}", line);
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
