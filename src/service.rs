//! Request/response boundary: validates raw card integers, calls the engine
//! and shapes JSON-friendly responses with timing metadata.

use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::analyze;
use crate::cards::{cards_from_ints, Card};
use crate::config::{DEFAULT_TRIALS, LIVE_TRIALS};
use crate::error::{EngineError, EngineResult};
use crate::live::live_analysis;
use crate::simulation::TrialEngine;
use crate::streets::{equity_by_street, trials_per_street, StreetEquity};

pub const MAX_TRIALS: u32 = 500_000;
pub const MAX_STREET_TRIALS: u32 = 20_000;
pub const MIN_TRIALS_PER_STREET: u32 = 500;

fn default_opponents() -> usize {
    1
}

fn default_trials() -> u32 {
    DEFAULT_TRIALS
}

fn default_live_trials() -> u32 {
    LIVE_TRIALS
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Advisory action shown next to a simulation result.
pub fn suggested_action(equity: f64) -> &'static str {
    if equity >= 0.5 {
        "Bet"
    } else {
        "Check / Fold"
    }
}

pub fn strategy_message(win_pct: f64, tie_pct: f64) -> &'static str {
    let equity = win_pct + tie_pct / 2.0;
    if equity >= 0.65 {
        "Strong equity: consider betting or raising for value."
    } else if equity >= 0.50 {
        "Positive equity: betting or calling is often correct."
    } else if equity >= 0.35 {
        "Moderate equity: play depends on pot odds and opponent tendencies."
    } else if equity >= 0.20 {
        "Low equity: consider folding unless pot odds justify a call."
    } else {
        "Weak equity: folding is usually correct unless you have strong implied odds."
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub hole_cards: Vec<i64>,
    #[serde(default)]
    pub board: Vec<i64>,
    #[serde(default = "default_opponents")]
    pub num_opponents: usize,
    #[serde(default = "default_trials")]
    pub num_trials: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulateRequest {
    fn cards(&self) -> EngineResult<(Vec<Card>, Vec<Card>)> {
        Ok((cards_from_ints(&self.hole_cards)?, cards_from_ints(&self.board)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub win_pct: f64,
    pub tie_pct: f64,
    pub loss_pct: f64,
    pub equity: f64,
    pub suggested_action: String,
    pub strategy_message: String,
    pub elapsed_ms: Option<f64>,
}

pub fn simulate(engine: &TrialEngine, req: &SimulateRequest) -> EngineResult<SimulateResponse> {
    let started = Instant::now();
    if req.num_trials > MAX_TRIALS {
        return Err(EngineError::arity(format!(
            "num_trials must be at most {}, got {}",
            MAX_TRIALS, req.num_trials
        )));
    }
    let (hole, board) = req.cards()?;
    let result = engine.simulate(&hole, &board, req.num_opponents, req.num_trials, req.seed)?;

    let elapsed = elapsed_ms(started);
    info!("Simulation: {} trials -> {:.1}ms", req.num_trials, elapsed);
    let (win_pct, tie_pct) = (result.win_rate(), result.tie_rate());
    Ok(SimulateResponse {
        win_pct,
        tie_pct,
        loss_pct: result.loss_rate(),
        equity: result.equity(),
        suggested_action: suggested_action(result.equity()).to_string(),
        strategy_message: strategy_message(win_pct, tie_pct).to_string(),
        elapsed_ms: Some(elapsed),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct EquityByStreetResponse {
    pub streets: Vec<StreetEquity>,
    pub elapsed_ms: Option<f64>,
}

pub fn street_equity(
    engine: &TrialEngine,
    req: &SimulateRequest,
) -> EngineResult<EquityByStreetResponse> {
    let started = Instant::now();
    let (hole, board) = req.cards()?;
    // Budget is split, not validated: a zero total still runs the floor.
    let per_street = trials_per_street(req.num_trials.min(MAX_STREET_TRIALS), MIN_TRIALS_PER_STREET);
    let streets = equity_by_street(engine, &hole, &board, req.num_opponents, per_street, req.seed)?;

    let elapsed = elapsed_ms(started);
    info!(
        "Equity by street: {} streets x {} trials -> {:.1}ms",
        streets.len(),
        per_street,
        elapsed
    );
    Ok(EquityByStreetResponse {
        streets,
        elapsed_ms: Some(elapsed),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub hole_cards: Vec<i64>,
    #[serde(default)]
    pub board: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub hand_name: String,
    pub hand_description: Option<String>,
    pub hands_that_beat: Vec<String>,
    pub potential_draws: Vec<String>,
    pub elapsed_ms: Option<f64>,
}

pub fn analyze_hand(req: &AnalyzeRequest) -> EngineResult<AnalyzeResponse> {
    let started = Instant::now();
    let hole = cards_from_ints(&req.hole_cards)?;
    let board = cards_from_ints(&req.board)?;
    let analysis = analyze(&hole, &board)?;

    let elapsed = elapsed_ms(started);
    info!("Analyze: {} cards -> {:.1}ms", hole.len() + board.len(), elapsed);
    Ok(AnalyzeResponse {
        hand_name: analysis.hand_name().to_string(),
        hand_description: analysis.current.map(|key| key.describe()),
        hands_that_beat: analysis
            .hands_that_beat
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        potential_draws: analysis.draws.iter().map(|d| d.to_string()).collect(),
        elapsed_ms: Some(elapsed),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveAnalysisRequest {
    pub cards: Vec<i64>,
    #[serde(default = "default_opponents")]
    pub num_opponents: usize,
    #[serde(default = "default_live_trials")]
    pub num_trials: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandShare {
    pub hand: String,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveAnalysisResponse {
    pub cards_count: usize,
    pub message: Option<String>,
    pub win_pct: f64,
    pub tie_pct: f64,
    pub loss_pct: f64,
    pub equity: f64,
    pub hand_distribution: Vec<HandShare>,
    pub best_possible_hand: String,
    pub current_hand: Option<String>,
    pub hole_cards: Vec<Card>,
    pub board_cards: Vec<Card>,
    pub elapsed_ms: Option<f64>,
}

pub fn live(engine: &TrialEngine, req: &LiveAnalysisRequest) -> EngineResult<LiveAnalysisResponse> {
    let started = Instant::now();
    let cards = cards_from_ints(&req.cards)?;
    if cards.is_empty() || cards.len() > 7 {
        return Err(EngineError::arity(format!(
            "live analysis needs 1 to 7 cards, got {}",
            cards.len()
        )));
    }

    if cards.len() == 1 {
        return Ok(LiveAnalysisResponse {
            cards_count: 1,
            message: Some("Select 2 hole cards for probability analysis.".to_string()),
            win_pct: 0.0,
            tie_pct: 0.0,
            loss_pct: 0.0,
            equity: 0.0,
            hand_distribution: Vec::new(),
            best_possible_hand: "Need 2+ cards".to_string(),
            current_hand: None,
            hole_cards: cards,
            board_cards: Vec::new(),
            elapsed_ms: Some(elapsed_ms(started)),
        });
    }

    let report = live_analysis(engine, &cards, req.num_opponents, req.num_trials, req.seed)?;
    let elapsed = elapsed_ms(started);
    info!(
        "Live analysis: {} cards, {} trials -> {:.1}ms",
        cards.len(),
        req.num_trials,
        elapsed
    );
    Ok(LiveAnalysisResponse {
        cards_count: cards.len(),
        message: None,
        win_pct: report.result.win_rate(),
        tie_pct: report.result.tie_rate(),
        loss_pct: report.result.loss_rate(),
        equity: report.result.equity(),
        hand_distribution: report
            .distribution
            .iter()
            .map(|s| HandShare {
                hand: s.category.name().to_string(),
                share: s.share,
            })
            .collect(),
        best_possible_hand: report.best_possible.name().to_string(),
        current_hand: report.current.map(|c| c.name().to_string()),
        hole_cards: report.hole,
        board_cards: report.board,
        elapsed_ms: Some(elapsed),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub win_pct: f64,
}

/// Runs a tiny simulation to prove the engine is wired up.
pub fn health(engine: &TrialEngine) -> EngineResult<HealthResponse> {
    let hole = cards_from_ints(&[0, 1])?;
    let result = engine.simulate(&hole, &[], 1, 10, None)?;
    Ok(HealthResponse {
        ok: true,
        win_pct: result.win_rate(),
    })
}

pub const ENDPOINTS: &[&str] = &["simulate", "equity-by-street", "analyze", "live-analysis", "health"];

/// Dispatches a raw JSON body to the named endpoint and returns the JSON
/// response.
pub fn handle_json(engine: &TrialEngine, endpoint: &str, body: &str) -> EngineResult<String> {
    debug!("{} request: {}", endpoint, body.trim());
    let response = dispatch(engine, endpoint, body);
    if let Err(e) = &response {
        warn!("{} request rejected: {}", endpoint, e);
    }
    response
}

fn dispatch(engine: &TrialEngine, endpoint: &str, body: &str) -> EngineResult<String> {
    let json = match endpoint {
        "simulate" => serde_json::to_string_pretty(&simulate(engine, &serde_json::from_str(body)?)?)?,
        "equity-by-street" => {
            serde_json::to_string_pretty(&street_equity(engine, &serde_json::from_str(body)?)?)?
        }
        "analyze" => serde_json::to_string_pretty(&analyze_hand(&serde_json::from_str(body)?)?)?,
        "live-analysis" => serde_json::to_string_pretty(&live(engine, &serde_json::from_str(body)?)?)?,
        "health" => serde_json::to_string_pretty(&health(engine)?)?,
        other => return Err(EngineError::UnknownEndpoint(other.to_string())),
    };
    Ok(json)
}
