pub mod analysis;
pub mod cards;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod hand_evaluator;
pub mod live;
pub mod service;
pub mod simulation;
pub mod streets;
