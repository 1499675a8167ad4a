use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::cards::{ensure_distinct, Card, Rank};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

pub const ALL_CATEGORIES: [HandCategory; 9] = [
    HandCategory::HighCard,
    HandCategory::OnePair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfAKind,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FullHouse,
    HandCategory::FourOfAKind,
    HandCategory::StraightFlush,
];

impl HandCategory {
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Every category strictly stronger than `self`, weakest first.
    pub fn stronger(self) -> Vec<HandCategory> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .filter(|&c| c > self)
            .collect()
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strength of a five-card hand. Compares by category, then by the
/// tiebreak ranks most-significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandKey {
    category: HandCategory,
    tiebreak: [u8; 5],
    len: u8,
}

impl HandKey {
    pub fn new(category: HandCategory, ranks: &[u8]) -> HandKey {
        let mut tiebreak = [0u8; 5];
        let len = ranks.len().min(5);
        tiebreak[..len].copy_from_slice(&ranks[..len]);
        HandKey {
            category,
            tiebreak,
            len: len as u8,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak[..self.len as usize]
    }

    pub fn is_royal(&self) -> bool {
        self.category == HandCategory::StraightFlush && self.tiebreak[0] == Rank::Ace.index()
    }

    /// Human readable description, e.g. "Two Pair, Kings and Fives".
    pub fn describe(&self) -> String {
        let rank = |i: usize| Rank::from_index(self.tiebreak[i]).name();
        let ranks = |i: usize| Rank::from_index(self.tiebreak[i]).plural();
        match self.category {
            HandCategory::StraightFlush if self.is_royal() => "Royal Flush".to_string(),
            HandCategory::StraightFlush | HandCategory::Straight => {
                format!("{}, {} high", self.category, rank(0))
            }
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", ranks(0)),
            HandCategory::FullHouse => format!("Full House, {} full of {}", ranks(0), ranks(1)),
            HandCategory::Flush => format!("Flush, {} high", rank(0)),
            HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", ranks(0)),
            HandCategory::TwoPair => format!("Two Pair, {} and {}", ranks(0), ranks(1)),
            HandCategory::OnePair => format!("One Pair, {}", ranks(0)),
            HandCategory::HighCard => format!("High Card, {}", rank(0)),
        }
    }
}

impl fmt::Display for HandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

const WHEEL_MASK: u16 = (1 << 12) | 0b1111;

pub(crate) fn rank_mask(cards: &[Card]) -> u16 {
    cards
        .iter()
        .fold(0u16, |mask, c| mask | (1 << c.rank().index()))
}

/// Highest straight contained in a rank bitmask. The wheel reports rank 3.
pub(crate) fn straight_high(mask: u16) -> Option<u8> {
    for high in (4..=12u8).rev() {
        let window = 0x1Fu16 << (high - 4);
        if mask & window == window {
            return Some(high);
        }
    }
    if mask & WHEEL_MASK == WHEEL_MASK {
        return Some(3);
    }
    None
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandKey {
    let mut counts = [0u8; 13];
    for c in cards {
        counts[c.rank().index() as usize] += 1;
    }

    let suit = cards[0].suit();
    let flush = cards.iter().all(|c| c.suit() == suit);
    let straight = straight_high(rank_mask(cards));

    if flush {
        if let Some(high) = straight {
            return HandKey::new(HandCategory::StraightFlush, &[high]);
        }
    }

    // (count, rank) sorted by count desc, then rank desc
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for rank in (0..13u8).rev() {
        let count = counts[rank as usize];
        if count > 0 {
            groups[n] = (count, rank);
            n += 1;
        }
    }
    let groups = &mut groups[..n];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    let mut group_ranks = [0u8; 5];
    for (slot, g) in group_ranks.iter_mut().zip(groups.iter()) {
        *slot = g.1;
    }
    let group_ranks = &group_ranks[..n];

    let shape = (groups[0].0, groups.get(1).map_or(0, |g| g.0));
    match shape {
        (4, _) => return HandKey::new(HandCategory::FourOfAKind, group_ranks),
        (3, 2) => return HandKey::new(HandCategory::FullHouse, group_ranks),
        _ => {}
    }
    if flush {
        return HandKey::new(HandCategory::Flush, group_ranks);
    }
    if let Some(high) = straight {
        return HandKey::new(HandCategory::Straight, &[high]);
    }

    let category = match shape {
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandKey::new(category, group_ranks)
}

/// Best five-card key of exactly seven cards, without allocating.
pub(crate) fn best_of_seven(cards: &[Card; 7]) -> HandKey {
    let mut best = evaluate_five(&[cards[2], cards[3], cards[4], cards[5], cards[6]]);
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            if skip_a == 0 && skip_b == 1 {
                continue;
            }
            let mut five = [cards[0]; 5];
            let mut n = 0;
            for (i, &c) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[n] = c;
                    n += 1;
                }
            }
            let key = evaluate_five(&five);
            if key > best {
                best = key;
            }
        }
    }
    best
}

/// Best five-card key out of 5, 6 or 7 cards.
pub fn best_hand_key(cards: &[Card]) -> EngineResult<HandKey> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EngineError::arity(format!(
            "hand evaluation needs 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    ensure_distinct(cards)?;

    if let Ok(seven) = <&[Card; 7]>::try_from(cards) {
        return Ok(best_of_seven(seven));
    }

    let best = cards
        .iter()
        .copied()
        .combinations(5)
        .map(|combo| evaluate_five(&[combo[0], combo[1], combo[2], combo[3], combo[4]]))
        .max();
    best.ok_or_else(|| EngineError::arity("no five-card subset"))
}

/// Compares two seven-card hands: 1 if `hand1` wins, -1 if it loses, 0 on a tie.
/// Each hand must be free of repeats; the two hands may share cards.
pub fn compare_hands(hand1: &[Card], hand2: &[Card]) -> EngineResult<i32> {
    if hand1.len() != 7 || hand2.len() != 7 {
        return Err(EngineError::arity(format!(
            "compare needs two 7-card hands, got {} and {}",
            hand1.len(),
            hand2.len()
        )));
    }
    let k1 = best_hand_key(hand1)?;
    let k2 = best_hand_key(hand2)?;
    Ok(match k1.cmp(&k2) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
