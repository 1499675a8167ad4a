//! Monte Carlo trial engine: completes the board, deals random opponent hands
//! and tallies how often the hero wins, ties or loses.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::cards::{remaining_deck, Card};
use crate::config::{EngineConfig, MAX_OPPONENTS};
use crate::error::{EngineError, EngineResult};
use crate::hand_evaluator::{best_of_seven, HandKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimResult {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub total: u64,
}

impl SimResult {
    fn rate(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    pub fn equity(&self) -> f64 {
        self.win_rate() + self.tie_rate() / 2.0
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.total += 1;
    }
}

impl Add for SimResult {
    type Output = SimResult;

    fn add(self, other: SimResult) -> SimResult {
        SimResult {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
            total: self.total + other.total,
        }
    }
}

impl fmt::Display for SimResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%)",
            self.win_rate() * 100.0,
            self.tie_rate() * 100.0,
            self.loss_rate() * 100.0,
            self.equity() * 100.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Win/tie/loss counts plus how often the hero finished with each category.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Tally {
    pub result: SimResult,
    pub categories: [u64; 9],
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.result = self.result + other.result;
        for (a, b) in self.categories.iter_mut().zip(other.categories) {
            *a += b;
        }
        self
    }
}

/// Validated inputs for one simulation call.
pub(crate) struct TrialSetup {
    hole: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    trials: u64,
    remaining: Vec<Card>,
}

impl TrialSetup {
    /// Accepts any board of up to five cards; street-shaped boards are
    /// enforced by the public entry points.
    pub fn new(hole: &[Card], board: &[Card], opponents: usize, trials: u32) -> EngineResult<Self> {
        let hole: [Card; 2] = hole.try_into().map_err(|_| {
            EngineError::arity(format!("hole_cards must have exactly 2 cards, got {}", hole.len()))
        })?;
        if board.len() > 5 {
            return Err(EngineError::arity(format!(
                "board must have at most 5 cards, got {}",
                board.len()
            )));
        }
        if !(1..=MAX_OPPONENTS).contains(&opponents) {
            return Err(EngineError::arity(format!(
                "num_opponents must be 1-{}, got {}",
                MAX_OPPONENTS, opponents
            )));
        }
        if trials == 0 {
            return Err(EngineError::arity("num_trials must be positive"));
        }

        let mut known = hole.to_vec();
        known.extend_from_slice(board);
        let remaining = remaining_deck(&known)?;

        let needed = 2 * opponents + (5 - board.len());
        if needed > remaining.len() {
            return Err(EngineError::InsufficientDeck {
                requested: needed,
                available: remaining.len(),
            });
        }

        Ok(TrialSetup {
            hole,
            board: board.to_vec(),
            opponents,
            trials: trials as u64,
            remaining,
        })
    }

    fn run_batch(&self, rng: &mut StdRng, trials: u64) -> Tally {
        let mut tally = Tally::default();
        let known_board = self.board.len();
        let missing = 5 - known_board;

        let mut deck = self.remaining.clone();
        let mut hero = [self.hole[0]; 7];
        hero[..2].copy_from_slice(&self.hole);
        hero[2..2 + known_board].copy_from_slice(&self.board);
        let mut villain = hero;

        for _ in 0..trials {
            deck.copy_from_slice(&self.remaining);
            deck.shuffle(rng);

            // Missing board cards come off the top, earliest street first.
            hero[2 + known_board..].copy_from_slice(&deck[..missing]);
            let hero_key = best_of_seven(&hero);
            tally.categories[hero_key.category().index()] += 1;

            villain[2..].copy_from_slice(&hero[2..]);
            let opponents = (0..self.opponents).map(|seat| {
                let at = missing + 2 * seat;
                villain[0] = deck[at];
                villain[1] = deck[at + 1];
                best_of_seven(&villain)
            });
            tally.result.record(classify(hero_key, opponents));
        }
        tally
    }
}

/// Outcome of one trial. Opponents are scored in seat order: the first one
/// holding a stronger hand makes it a loss and the rest are never evaluated,
/// an equal hand makes it a tie unless a later seat wins.
pub(crate) fn classify<I>(hero: HandKey, opponents: I) -> Outcome
where
    I: IntoIterator<Item = HandKey>,
{
    let mut outcome = Outcome::Win;
    for villain in opponents {
        match villain.cmp(&hero) {
            Ordering::Greater => return Outcome::Loss,
            Ordering::Equal => outcome = Outcome::Tie,
            Ordering::Less => {}
        }
    }
    outcome
}

/// Derives an independent RNG stream seed from a call seed.
pub fn stream_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub(crate) fn validate_street_board(board: &[Card]) -> EngineResult<()> {
    if matches!(board.len(), 0 | 3 | 4 | 5) {
        Ok(())
    } else {
        Err(EngineError::arity(format!(
            "board must have 0, 3, 4, or 5 cards, got {}",
            board.len()
        )))
    }
}

pub struct TrialEngine {
    config: EngineConfig,
}

impl Default for TrialEngine {
    fn default() -> Self {
        TrialEngine::new(EngineConfig::default())
    }
}

impl TrialEngine {
    pub fn new(config: EngineConfig) -> Self {
        TrialEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimates the hero's win/tie/loss frequencies against `opponents`
    /// random hands. Identical inputs and seed give identical counts.
    pub fn simulate(
        &self,
        hole: &[Card],
        board: &[Card],
        opponents: usize,
        trials: u32,
        seed: Option<u64>,
    ) -> EngineResult<SimResult> {
        validate_street_board(board)?;
        let setup = TrialSetup::new(hole, board, opponents, trials)?;
        Ok(self.run(&setup, seed).result)
    }

    /// Runs every check `simulate` would, without running trials.
    pub fn validate(
        &self,
        hole: &[Card],
        board: &[Card],
        opponents: usize,
        trials: u32,
    ) -> EngineResult<()> {
        TrialSetup::new(hole, board, opponents, trials).map(|_| ())
    }

    pub(crate) fn run(&self, setup: &TrialSetup, seed: Option<u64>) -> Tally {
        let seed = seed.unwrap_or(self.config.default_seed);
        let batch_size = self.config.batch_size.max(1) as u64;
        let batches = setup.trials.div_ceil(batch_size);

        let batch = |index: u64| {
            let trials = batch_size.min(setup.trials - index * batch_size);
            let mut rng = StdRng::seed_from_u64(stream_seed(seed, index));
            setup.run_batch(&mut rng, trials)
        };

        if self.config.parallel && batches > 1 {
            (0..batches)
                .into_par_iter()
                .map(batch)
                .reduce(Tally::default, Tally::merge)
        } else {
            (0..batches).map(batch).fold(Tally::default(), Tally::merge)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    use crate::hand_evaluator::HandCategory;

    fn pair(rank: u8) -> HandKey {
        HandKey::new(HandCategory::OnePair, &[rank, 12, 11, 10])
    }

    #[test]
    fn test_classify_no_opponent_catches_up() {
        assert_eq!(classify(pair(8), [pair(3), pair(7)]), Outcome::Win);
    }

    #[test]
    fn test_classify_tie_then_weaker_stays_tie() {
        assert_eq!(classify(pair(8), [pair(8), pair(2)]), Outcome::Tie);
    }

    #[test]
    fn test_classify_tie_then_stronger_is_loss() {
        assert_eq!(classify(pair(8), [pair(8), pair(9)]), Outcome::Loss);
    }

    #[test]
    fn test_classify_stops_at_first_stronger() {
        let mut evaluated = 0;
        let keys = [pair(2), pair(10), pair(8), pair(1)];
        let outcome = classify(pair(8), keys.iter().copied().inspect(|_| evaluated += 1));
        assert_eq!(outcome, Outcome::Loss);
        assert_eq!(evaluated, 2);
    }

    #[test]
    fn test_tally_merge() {
        let mut a = Tally::default();
        a.result.record(Outcome::Win);
        a.categories[1] = 1;
        let mut b = Tally::default();
        b.result.record(Outcome::Tie);
        b.result.record(Outcome::Loss);
        b.categories[1] = 2;
        let merged = a.merge(b);
        assert_eq!(merged.result.total, 3);
        assert_eq!(merged.result.wins, 1);
        assert_eq!(merged.categories[1], 3);
    }

    #[test]
    fn test_setup_accepts_partial_board() {
        let hole = parse_cards("AhKh").unwrap();
        let board = parse_cards("Qh").unwrap();
        assert!(TrialSetup::new(&hole, &board, 1, 10).is_ok());
    }

    #[test]
    fn test_categories_counted_per_trial() {
        let engine = TrialEngine::default();
        let hole = parse_cards("AhKh").unwrap();
        let setup = TrialSetup::new(&hole, &[], 2, 3000).unwrap();
        let tally = engine.run(&setup, Some(6));
        assert_eq!(tally.categories.iter().sum::<u64>(), 3000);
    }

    #[test]
    fn test_last_batch_is_partial() {
        let engine = TrialEngine::new(EngineConfig::default().with_batch_size(1000));
        let hole = parse_cards("7s7d").unwrap();
        let setup = TrialSetup::new(&hole, &[], 1, 2500).unwrap();
        assert_eq!(engine.run(&setup, None).result.total, 2500);
    }
}
