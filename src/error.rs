use thiserror::Error;

use crate::cards::Card;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid card: {0} (must be 0-51)")]
    InvalidCard(i64),

    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),

    #[error("{0}")]
    InvalidArity(String),

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    InsufficientDeck { requested: usize, available: usize },

    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EngineError {
    pub fn arity(msg: impl Into<String>) -> Self {
        EngineError::InvalidArity(msg.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
