use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

pub const RANKS_STR: &str = "23456789TJQKA";
pub const SUITS_STR: &str = "cdhs";
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub fn from_char(c: char) -> EngineResult<Rank> {
        match RANKS_STR.find(c.to_ascii_uppercase()) {
            Some(i) => Ok(ALL_RANKS[i]),
            None => Err(EngineError::InvalidRank(c)),
        }
    }

    pub fn from_index(index: u8) -> Rank {
        ALL_RANKS[index as usize % 13]
    }

    pub fn to_char(self) -> char {
        RANKS_STR.as_bytes()[self as usize] as char
    }

    /// 0 for a deuce up to 12 for an ace.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    pub fn plural(self) -> String {
        match self {
            Rank::Six => "Sixes".to_string(),
            _ => format!("{}s", self.name()),
        }
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub fn from_char(c: char) -> EngineResult<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(EngineError::InvalidSuit(c)),
        }
    }

    pub fn from_index(index: u8) -> Suit {
        ALL_SUITS[index as usize % 4]
    }

    pub fn to_char(self) -> char {
        SUITS_STR.as_bytes()[self as usize] as char
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "\u{2663}",
            Suit::Diamonds => "\u{2666}",
            Suit::Hearts => "\u{2665}",
            Suit::Spades => "\u{2660}",
        }
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// A card encoded as `suit * 13 + rank`, always in `0..52`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit.index() * 13 + rank.index())
    }

    pub fn from_index(index: u8) -> EngineResult<Card> {
        if (index as usize) < DECK_SIZE {
            Ok(Card(index))
        } else {
            Err(EngineError::InvalidCard(index as i64))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.0 % 13)
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(self.0 / 13)
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.0
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank().to_char(), self.suit().symbol())
    }
}

impl TryFrom<i64> for Card {
    type Error = EngineError;

    fn try_from(value: i64) -> EngineResult<Card> {
        if (0..DECK_SIZE as i64).contains(&value) {
            Ok(Card(value as u8))
        } else {
            Err(EngineError::InvalidCard(value))
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().to_char(), self.suit().to_char())
    }
}

pub fn all_cards() -> impl Iterator<Item = Card> {
    (0..DECK_SIZE as u8).map(Card)
}

/// Validates raw integers from a request into cards.
pub fn cards_from_ints(values: &[i64]) -> EngineResult<Vec<Card>> {
    values.iter().map(|&v| Card::try_from(v)).collect()
}

/// Fails on the first card that appears twice.
pub fn ensure_distinct(cards: &[Card]) -> EngineResult<u64> {
    let mut mask = 0u64;
    for &card in cards {
        if mask & card.bit() != 0 {
            return Err(EngineError::DuplicateCard(card));
        }
        mask |= card.bit();
    }
    Ok(mask)
}

/// The 52-card universe minus `known`, in index order.
pub fn remaining_deck(known: &[Card]) -> EngineResult<Vec<Card>> {
    let mask = ensure_distinct(known)?;
    Ok(all_cards().filter(|c| mask & c.bit() == 0).collect())
}

pub fn parse_card(notation: &str) -> EngineResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(EngineError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses "AhKd", "Ah Kd" or "Ah,Kd" into cards.
pub fn parse_cards(notation: &str) -> EngineResult<Vec<Card>> {
    let compact: String = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if compact.chars().count() % 2 != 0 {
        return Err(EngineError::InvalidCardNotation(notation.trim().to_string()));
    }
    let chars: Vec<char> = compact.chars().collect();
    chars
        .chunks(2)
        .map(|pair| parse_card(&pair.iter().collect::<String>()))
        .collect()
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
