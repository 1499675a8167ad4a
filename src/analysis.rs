use std::fmt;

use serde::Serialize;

use crate::cards::{ensure_distinct, Card};
use crate::error::{EngineError, EngineResult};
use crate::hand_evaluator::{best_hand_key, rank_mask, straight_high, HandCategory, HandKey};

pub const NEED_MORE_CARDS: &str = "Need 5+ cards";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Draw {
    Flush { outs: u8 },
    OpenEndedStraight { outs: u8 },
    GutshotStraight { outs: u8 },
    Trips { outs: u8 },
    FullHouse { outs: u8 },
    Quads { outs: u8 },
}

impl Draw {
    pub fn outs(&self) -> u8 {
        match *self {
            Draw::Flush { outs }
            | Draw::OpenEndedStraight { outs }
            | Draw::GutshotStraight { outs }
            | Draw::Trips { outs }
            | Draw::FullHouse { outs }
            | Draw::Quads { outs } => outs,
        }
    }

    /// Category the draw completes to.
    pub fn target(&self) -> HandCategory {
        match self {
            Draw::Flush { .. } => HandCategory::Flush,
            Draw::OpenEndedStraight { .. } | Draw::GutshotStraight { .. } => HandCategory::Straight,
            Draw::Trips { .. } => HandCategory::ThreeOfAKind,
            Draw::FullHouse { .. } => HandCategory::FullHouse,
            Draw::Quads { .. } => HandCategory::FourOfAKind,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Draw::Flush { .. } => "Flush draw",
            Draw::OpenEndedStraight { .. } => "Open-ended straight draw",
            Draw::GutshotStraight { .. } => "Gutshot straight draw",
            Draw::Trips { .. } => "Trips draw",
            Draw::FullHouse { .. } => "Full house draw",
            Draw::Quads { .. } => "Quads draw",
        }
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outs = self.outs();
        let noun = if outs == 1 { "out" } else { "outs" };
        write!(f, "{} ({} {})", self.label(), outs, noun)
    }
}

#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Best hand made from the known cards; absent below five cards.
    pub current: Option<HandKey>,
    pub hands_that_beat: Vec<HandCategory>,
    pub draws: Vec<Draw>,
}

impl HandAnalysis {
    pub fn hand_name(&self) -> &'static str {
        self.current
            .map(|key| key.category().name())
            .unwrap_or(NEED_MORE_CARDS)
    }
}

/// Names the hero's current hand, the categories above it and the draws
/// still live, from the known cards only.
pub fn analyze(hole: &[Card], board: &[Card]) -> EngineResult<HandAnalysis> {
    if hole.len() != 2 {
        return Err(EngineError::arity(format!(
            "hole_cards must have exactly 2 cards, got {}",
            hole.len()
        )));
    }
    if board.len() > 5 {
        return Err(EngineError::arity(format!(
            "board must have at most 5 cards, got {}",
            board.len()
        )));
    }

    let mut known = hole.to_vec();
    known.extend_from_slice(board);
    ensure_distinct(&known)?;

    let current = if known.len() >= 5 {
        Some(best_hand_key(&known)?)
    } else {
        None
    };
    let hands_that_beat = current
        .map(|key| key.category().stronger())
        .unwrap_or_default();

    // Nothing is live once the river is out.
    let draws = if board.len() < 5 {
        detect_draws(&known, current)
    } else {
        Vec::new()
    };

    Ok(HandAnalysis {
        current,
        hands_that_beat,
        draws,
    })
}

/// Pattern-matches draws on a set of known cards. Deterministic; no sampling.
/// Draws that complete to `current`'s category or lower are dropped.
pub fn detect_draws(known: &[Card], current: Option<HandKey>) -> Vec<Draw> {
    let mut draws = Vec::new();

    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 13];
    for c in known {
        suit_counts[c.suit().index() as usize] += 1;
        rank_counts[c.rank().index() as usize] += 1;
    }

    let made_flush = suit_counts.iter().any(|&n| n >= 5);
    if !made_flush && suit_counts.contains(&4) {
        draws.push(Draw::Flush { outs: 9 });
    }

    let mask = rank_mask(known);
    if straight_high(mask).is_none() {
        let completing = (0..13u8)
            .filter(|&r| mask & (1 << r) == 0 && straight_high(mask | (1 << r)).is_some())
            .count() as u8;
        match completing {
            0 => {}
            1 => draws.push(Draw::GutshotStraight { outs: 4 }),
            n => draws.push(Draw::OpenEndedStraight { outs: 4 * n }),
        }
    }

    let ranks_with = |count: u8| rank_counts.iter().filter(move |&&n| n == count).count() as u8;
    let (quads, trips, pairs, singles) = (ranks_with(4), ranks_with(3), ranks_with(2), ranks_with(1));
    if quads == 0 {
        if trips > 0 {
            draws.push(Draw::Quads { outs: trips });
            if trips == 1 && pairs == 0 && singles > 0 {
                draws.push(Draw::FullHouse { outs: 3 * singles });
            }
        } else if pairs >= 2 {
            draws.push(Draw::FullHouse { outs: 2 * pairs });
        } else if pairs == 1 {
            draws.push(Draw::Trips { outs: 2 });
        }
    }

    if let Some(key) = current {
        draws.retain(|d| d.target() > key.category());
    }
    draws
}
