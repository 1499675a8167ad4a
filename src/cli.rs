use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;

use crate::analysis::analyze;
use crate::cards::{parse_cards, Card};
use crate::config::{EngineConfig, DEFAULT_TRIALS, LIVE_TRIALS};
use crate::display::{
    analysis_lines, board_display, distribution_table, equity_bar, print_error, print_section,
    result_table, street_table, styled_action,
};
use crate::error::EngineResult;
use crate::hand_evaluator::best_hand_key;
use crate::live::live_analysis;
use crate::service::{handle_json, strategy_message, suggested_action};
use crate::simulation::TrialEngine;
use crate::streets::equity_by_street;

#[derive(Parser)]
#[command(
    name = "equity",
    version = "1.0.0",
    about = "Texas Hold'em equity engine: Monte Carlo win/tie/loss, street equity and hand analysis."
)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Default RNG seed for calls that do not pass their own
    #[arg(long = "default-seed", global = true)]
    default_seed: Option<u64>,
    /// Run trial batches on the calling thread only
    #[arg(long, global = true)]
    serial: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate win/tie/loss against random opponents
    Simulate {
        /// Your hole cards (e.g., AhKh)
        hand: String,
        /// Board cards: 0, 3, 4 or 5 (e.g., QhJhTc)
        #[arg(short, long)]
        board: Option<String>,
        /// Number of opponents (1-8)
        #[arg(short, long, default_value = "1")]
        opponents: usize,
        /// Number of trials
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: u32,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Equity at each street up to the current board
    Streets {
        /// Your hole cards (e.g., AhKh)
        hand: String,
        /// Board cards: 0, 3, 4 or 5
        #[arg(short, long)]
        board: Option<String>,
        /// Number of opponents (1-8)
        #[arg(short, long, default_value = "1")]
        opponents: usize,
        /// Trials per street
        #[arg(short = 'n', long, default_value = "2500")]
        trials: u32,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Name your hand, what beats it, and your live draws
    Analyze {
        /// Your hole cards (e.g., 9h8h)
        hand: String,
        /// Board cards, up to 5
        #[arg(short, long)]
        board: Option<String>,
    },
    /// Quick low-trial estimate for 2-7 selected cards (hole cards first)
    Live {
        /// Selected cards (e.g., AhKh or AhKhQh7c)
        cards: String,
        /// Number of opponents (1-8)
        #[arg(short, long, default_value = "1")]
        opponents: usize,
        /// Number of trials
        #[arg(short = 'n', long, default_value_t = LIVE_TRIALS)]
        trials: u32,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate the best five-card hand out of 5-7 cards
    Eval {
        /// Cards (e.g., AhKhQhJhTh2c3d)
        cards: String,
    },
    /// Answer a JSON request for an endpoint (reads stdin when no file is given)
    Request {
        /// simulate, equity-by-street, analyze, live-analysis or health
        endpoint: String,
        /// JSON request body file
        input: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = dispatch(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn build_engine(cli: &Cli) -> EngineResult<TrialEngine> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.default_seed {
        config = config.with_seed(seed);
    }
    if cli.serial {
        config = config.serial();
    }
    debug!("Engine config: {:?}", config);
    Ok(TrialEngine::new(config))
}

fn dispatch(cli: Cli) -> EngineResult<()> {
    let engine = build_engine(&cli)?;
    match cli.command {
        Commands::Simulate {
            hand,
            board,
            opponents,
            trials,
            seed,
        } => cmd_simulate(&engine, &hand, board.as_deref(), opponents, trials, seed),
        Commands::Streets {
            hand,
            board,
            opponents,
            trials,
            seed,
        } => cmd_streets(&engine, &hand, board.as_deref(), opponents, trials, seed),
        Commands::Analyze { hand, board } => cmd_analyze(&hand, board.as_deref()),
        Commands::Live {
            cards,
            opponents,
            trials,
            seed,
        } => cmd_live(&engine, &cards, opponents, trials, seed),
        Commands::Eval { cards } => cmd_eval(&cards),
        Commands::Request { endpoint, input } => cmd_request(&engine, &endpoint, input),
    }
}

fn parse_hand_and_board(hand: &str, board: Option<&str>) -> EngineResult<(Vec<Card>, Vec<Card>)> {
    let hole = parse_cards(hand)?;
    let board = match board {
        Some(b) => parse_cards(b)?,
        None => Vec::new(),
    };
    Ok((hole, board))
}

fn print_header(hole: &[Card], board: &[Card], opponents: usize) {
    println!();
    println!(
        "  {}  on  {}  vs {} opponent{}",
        board_display(hole),
        board_display(board),
        opponents,
        if opponents == 1 { "" } else { "s" }
    );
}

fn cmd_simulate(
    engine: &TrialEngine,
    hand: &str,
    board: Option<&str>,
    opponents: usize,
    trials: u32,
    seed: Option<u64>,
) -> EngineResult<()> {
    let (hole, board) = parse_hand_and_board(hand, board)?;
    let result = engine.simulate(&hole, &board, opponents, trials, seed)?;

    print_header(&hole, &board, opponents);
    println!();
    println!("{}", result_table(&result));
    println!();
    println!("  Equity  {}", equity_bar(result.equity(), 30));
    println!(
        "  Action  {}  {}",
        styled_action(suggested_action(result.equity())),
        strategy_message(result.win_rate(), result.tie_rate()).dimmed()
    );
    println!();
    Ok(())
}

fn cmd_streets(
    engine: &TrialEngine,
    hand: &str,
    board: Option<&str>,
    opponents: usize,
    trials: u32,
    seed: Option<u64>,
) -> EngineResult<()> {
    let (hole, board) = parse_hand_and_board(hand, board)?;
    let streets = equity_by_street(engine, &hole, &board, opponents, trials, seed)?;

    print_header(&hole, &board, opponents);
    println!();
    println!("{}", street_table(&streets));
    println!();
    Ok(())
}

fn cmd_analyze(hand: &str, board: Option<&str>) -> EngineResult<()> {
    let (hole, board) = parse_hand_and_board(hand, board)?;
    let analysis = analyze(&hole, &board)?;

    println!();
    println!("  {}  on  {}", board_display(&hole), board_display(&board));
    print_section("Analysis", &analysis_lines(&analysis).join("\n"));
    println!();
    Ok(())
}

fn cmd_live(
    engine: &TrialEngine,
    cards: &str,
    opponents: usize,
    trials: u32,
    seed: Option<u64>,
) -> EngineResult<()> {
    let cards = parse_cards(cards)?;
    let report = live_analysis(engine, &cards, opponents, trials, seed)?;

    print_header(&report.hole, &report.board, opponents);
    println!();
    println!("  {}", report.result);
    println!("  Equity  {}", equity_bar(report.result.equity(), 30));
    if let Some(current) = report.current {
        println!("  Current hand  {}", current.name().bold());
    }
    println!("  Best possible  {}", report.best_possible.name().bold());
    print_section("Hand distribution", &distribution_table(&report.distribution));
    println!();
    Ok(())
}

fn cmd_eval(cards: &str) -> EngineResult<()> {
    let cards = parse_cards(cards)?;
    let key = best_hand_key(&cards)?;

    println!();
    println!("  {}", board_display(&cards));
    println!("  {}", key.describe().bold());
    println!();
    Ok(())
}

fn cmd_request(engine: &TrialEngine, endpoint: &str, input: Option<PathBuf>) -> EngineResult<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None if endpoint == "health" => String::new(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    println!("{}", handle_json(engine, endpoint, &body)?);
    Ok(())
}
