use approx::assert_relative_eq;
use poker_equity::error::EngineError;
use poker_equity::service::*;
use poker_equity::simulation::TrialEngine;
use serde_json::Value;

fn request(endpoint: &str, body: &str) -> Value {
    let engine = TrialEngine::default();
    let json = handle_json(&engine, endpoint, body).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_simulate_endpoint() {
    // Ace of clubs and ace of diamonds
    let response = request(
        "simulate",
        r#"{"hole_cards": [12, 25], "num_trials": 4000, "seed": 1}"#,
    );
    let win = response["win_pct"].as_f64().unwrap();
    let tie = response["tie_pct"].as_f64().unwrap();
    let loss = response["loss_pct"].as_f64().unwrap();
    assert_relative_eq!(win + tie + loss, 1.0, epsilon = 1e-9);
    assert_relative_eq!(response["equity"].as_f64().unwrap(), win + tie / 2.0, epsilon = 1e-12);
    assert_eq!(response["suggested_action"], "Bet");
    assert!(response["elapsed_ms"].as_f64().is_some());
}

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let body = r#"{"hole_cards": [0, 14], "board": [30, 31, 44], "num_opponents": 2, "num_trials": 3000, "seed": 77}"#;
    let a = request("simulate", body);
    let b = request("simulate", body);
    assert_eq!(a["win_pct"], b["win_pct"]);
    assert_eq!(a["tie_pct"], b["tie_pct"]);
}

#[test]
fn test_simulate_rejects_too_many_trials() {
    let engine = TrialEngine::default();
    let result = handle_json(
        &engine,
        "simulate",
        r#"{"hole_cards": [12, 25], "num_trials": 600000}"#,
    );
    assert!(matches!(result, Err(EngineError::InvalidArity(_))));
}

#[test]
fn test_simulate_rejects_invalid_card() {
    let engine = TrialEngine::default();
    let result = handle_json(&engine, "simulate", r#"{"hole_cards": [12, 52]}"#);
    assert!(matches!(result, Err(EngineError::InvalidCard(52))));
}

#[test]
fn test_malformed_body() {
    let engine = TrialEngine::default();
    let result = handle_json(&engine, "simulate", r#"{"hole_cards": "#);
    assert!(matches!(result, Err(EngineError::JsonError(_))));
}

#[test]
fn test_unknown_endpoint() {
    let engine = TrialEngine::default();
    assert!(matches!(
        handle_json(&engine, "fold", "{}"),
        Err(EngineError::UnknownEndpoint(_))
    ));
}

#[test]
fn test_equity_by_street_endpoint() {
    let response = request(
        "equity-by-street",
        r#"{"hole_cards": [12, 25], "num_trials": 2000, "seed": 3}"#,
    );
    let streets = response["streets"].as_array().unwrap();
    assert_eq!(streets.len(), 4);
    assert_eq!(streets[0]["street"], "preflop");
    assert_eq!(streets[3]["street"], "river");
    assert_eq!(streets[3]["board_len"], 5);
}

#[test]
fn test_equity_by_street_zero_budget_runs_floor() {
    let response = request(
        "equity-by-street",
        r#"{"hole_cards": [12, 25], "board": [0, 1, 2], "num_trials": 0, "seed": 3}"#,
    );
    assert_eq!(response["streets"].as_array().unwrap().len(), 2);
}

#[test]
fn test_analyze_endpoint() {
    // Ah Kh with Qh Jh Th on board
    let response = request(
        "analyze",
        r#"{"hole_cards": [38, 37], "board": [36, 35, 34]}"#,
    );
    assert_eq!(response["hand_name"], "Straight Flush");
    assert_eq!(response["hand_description"], "Royal Flush");
    assert!(response["hands_that_beat"].as_array().unwrap().is_empty());
    assert!(response["potential_draws"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_endpoint_reports_draws() {
    // Ah Kh with 2h 7h 9c
    let response = request("analyze", r#"{"hole_cards": [38, 37], "board": [26, 31, 7]}"#);
    assert_eq!(response["hand_name"], "High Card");
    assert_eq!(response["potential_draws"][0], "Flush draw (9 outs)");
}

#[test]
fn test_live_endpoint_single_card() {
    let response = request("live-analysis", r#"{"cards": [12]}"#);
    assert_eq!(response["cards_count"], 1);
    assert!(response["message"].is_string());
    assert_eq!(response["best_possible_hand"], "Need 2+ cards");
    assert_eq!(response["win_pct"], 0.0);
}

#[test]
fn test_live_endpoint() {
    let response = request(
        "live-analysis",
        r#"{"cards": [38, 37, 36], "num_trials": 1000, "seed": 9}"#,
    );
    assert_eq!(response["cards_count"], 3);
    assert!(response["message"].is_null());
    assert_eq!(response["hole_cards"], serde_json::json!([38, 37]));
    assert_eq!(response["board_cards"], serde_json::json!([36]));
    assert!(!response["hand_distribution"].as_array().unwrap().is_empty());
}

#[test]
fn test_live_endpoint_rejects_empty() {
    let engine = TrialEngine::default();
    assert!(handle_json(&engine, "live-analysis", r#"{"cards": []}"#).is_err());
}

#[test]
fn test_health() {
    let response = request("health", "");
    assert_eq!(response["ok"], true);
}

#[test]
fn test_suggested_action_threshold() {
    assert_eq!(suggested_action(0.5), "Bet");
    assert_eq!(suggested_action(0.49), "Check / Fold");
}

#[test]
fn test_strategy_message_buckets() {
    assert!(strategy_message(0.70, 0.0).starts_with("Strong"));
    assert!(strategy_message(0.50, 0.04).starts_with("Positive"));
    assert!(strategy_message(0.30, 0.20).starts_with("Moderate"));
    assert!(strategy_message(0.20, 0.0).starts_with("Low"));
    assert!(strategy_message(0.05, 0.0).starts_with("Weak"));
}
