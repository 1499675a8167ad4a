use std::fmt;

use serde::Serialize;

use crate::cards::Card;
use crate::error::EngineResult;
use crate::simulation::{stream_seed, validate_street_board, SimResult, TrialEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

pub const ALL_STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

impl Street {
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    pub fn from_board_len(len: usize) -> Option<Street> {
        ALL_STREETS.iter().copied().find(|s| s.board_len() == len)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreetEquity {
    pub street: Street,
    pub board_len: usize,
    pub equity: f64,
    pub win_pct: f64,
    pub tie_pct: f64,
    pub loss_pct: f64,
    #[serde(skip)]
    pub result: SimResult,
}

impl StreetEquity {
    fn new(street: Street, result: SimResult) -> Self {
        let win_pct = result.win_rate();
        let tie_pct = result.tie_rate();
        StreetEquity {
            street,
            board_len: street.board_len(),
            equity: win_pct + tie_pct / 2.0,
            win_pct,
            tie_pct,
            loss_pct: result.loss_rate(),
            result,
        }
    }
}

/// Equity at every street from preflop up to the one `board` has reached.
///
/// Each street is an independent simulation that freezes the first
/// `board_len` real board cards and samples the rest, with its own seed
/// derived from `seed` and the street. An empty board yields all four
/// streets, each sampled from the hole cards alone, so flop, turn and river
/// are then preflop re-samples that differ only by seed.
pub fn equity_by_street(
    engine: &TrialEngine,
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials_per_street: u32,
    seed: Option<u64>,
) -> EngineResult<Vec<StreetEquity>> {
    validate_street_board(board)?;
    // Validate the full input once so no street runs before a failure.
    engine.validate(hole, board, opponents, trials_per_street)?;

    let base_seed = seed.unwrap_or(engine.config().default_seed);
    let last = if board.is_empty() {
        Street::River
    } else {
        Street::from_board_len(board.len()).unwrap_or(Street::Preflop)
    };

    ALL_STREETS
        .iter()
        .copied()
        .filter(|&street| street <= last)
        .map(|street| {
            let known = &board[..street.board_len().min(board.len())];
            let street_seed = stream_seed(base_seed, street as u64);
            let result =
                engine.simulate(hole, known, opponents, trials_per_street, Some(street_seed))?;
            Ok(StreetEquity::new(street, result))
        })
        .collect()
}

/// Splits a total trial budget across the four streets, never going below
/// `floor` per street.
pub fn trials_per_street(total: u32, floor: u32) -> u32 {
    (total / ALL_STREETS.len() as u32).max(floor)
}
