use serde::Serialize;

use crate::cards::Card;
use crate::error::{EngineError, EngineResult};
use crate::hand_evaluator::{best_hand_key, HandCategory, ALL_CATEGORIES};
use crate::simulation::{SimResult, TrialEngine, TrialSetup};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: HandCategory,
    pub share: f64,
}

#[derive(Debug, Clone)]
pub struct LiveReport {
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
    pub result: SimResult,
    /// Hero category frequencies over the sampled runouts, most frequent first.
    pub distribution: Vec<CategoryShare>,
    pub best_possible: HandCategory,
    pub current: Option<HandCategory>,
}

/// Quick estimate for whatever cards are selected so far: the first two are
/// the hole cards, the rest (any count up to five) the board.
pub fn live_analysis(
    engine: &TrialEngine,
    cards: &[Card],
    opponents: usize,
    trials: u32,
    seed: Option<u64>,
) -> EngineResult<LiveReport> {
    if !(2..=7).contains(&cards.len()) {
        return Err(EngineError::arity(format!(
            "live analysis needs 2 to 7 cards, got {}",
            cards.len()
        )));
    }
    let (hole, board) = cards.split_at(2);
    let setup = TrialSetup::new(hole, board, opponents, trials)?;
    let tally = engine.run(&setup, seed);

    let total = tally.result.total.max(1) as f64;
    let mut distribution: Vec<CategoryShare> = ALL_CATEGORIES
        .iter()
        .zip(tally.categories)
        .filter(|(_, count)| *count > 0)
        .map(|(&category, count)| CategoryShare {
            category,
            share: count as f64 / total,
        })
        .collect();
    distribution.sort_by(|a, b| {
        b.share
            .total_cmp(&a.share)
            .then(b.category.cmp(&a.category))
    });

    let current = if cards.len() >= 5 {
        Some(best_hand_key(cards)?.category())
    } else {
        None
    };
    let seen_best = ALL_CATEGORIES
        .iter()
        .zip(tally.categories)
        .filter(|(_, count)| *count > 0)
        .map(|(&category, _)| category)
        .max()
        .unwrap_or(HandCategory::HighCard);

    Ok(LiveReport {
        hole: hole.to_vec(),
        board: board.to_vec(),
        result: tally.result,
        distribution,
        // With five or more cards known the hand on the table is what counts.
        best_possible: current.unwrap_or(seen_best),
        current,
    })
}
