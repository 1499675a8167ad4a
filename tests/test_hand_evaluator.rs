use poker_equity::cards::*;
use poker_equity::error::EngineError;
use poker_equity::hand_evaluator::*;

fn cards(notation: &str) -> Vec<Card> {
    parse_cards(notation).unwrap()
}

fn key(notation: &str) -> HandKey {
    best_hand_key(&cards(notation)).unwrap()
}

#[test]
fn test_royal_flush() {
    let result = key("AhKhQhJhTh");
    assert_eq!(result.category(), HandCategory::StraightFlush);
    assert_eq!(result.tiebreak(), &[12]);
    assert!(result.is_royal());
    assert_eq!(result.describe(), "Royal Flush");
}

#[test]
fn test_royal_flush_from_integers() {
    // Ah Kh / Qh Jh Th under suit * 13 + rank
    let hand = cards_from_ints(&[38, 37, 36, 35, 34, 0, 14]).unwrap();
    let result = best_hand_key(&hand).unwrap();
    assert_eq!(result.category(), HandCategory::StraightFlush);
    assert_eq!(result.tiebreak(), &[12]);
}

#[test]
fn test_straight_flush() {
    let result = key("9h8h7h6h5hAcKd");
    assert_eq!(result.category(), HandCategory::StraightFlush);
    assert_eq!(result.tiebreak(), &[7]);
}

#[test]
fn test_four_of_a_kind() {
    let result = key("KsKhKdKc5s2h3d");
    assert_eq!(result.category(), HandCategory::FourOfAKind);
    assert_eq!(result.tiebreak(), &[11, 3]);
}

#[test]
fn test_full_house() {
    let result = key("AsAhAdKsKh2c3d");
    assert_eq!(result.category(), HandCategory::FullHouse);
    assert_eq!(result.tiebreak(), &[12, 11]);
}

#[test]
fn test_full_house_from_two_trips() {
    let result = key("9s9h9d4c4s4h2d");
    assert_eq!(result.category(), HandCategory::FullHouse);
    assert_eq!(result.tiebreak(), &[7, 2]);
}

#[test]
fn test_flush() {
    let result = key("AsTs8s5s2sKdQh");
    assert_eq!(result.category(), HandCategory::Flush);
    assert_eq!(result.tiebreak(), &[12, 8, 6, 3, 0]);
}

#[test]
fn test_straight() {
    let result = key("9s8h7d6c5sAhKd");
    assert_eq!(result.category(), HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[7]);
}

#[test]
fn test_wheel() {
    let result = key("As2h3d4c5sKhQd");
    assert_eq!(result.category(), HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[3]);
}

#[test]
fn test_wheel_loses_to_six_high_straight() {
    let wheel = key("As2h3d4c5s");
    let six_high = key("2h3d4c5s6h");
    assert!(six_high > wheel);
}

#[test]
fn test_no_wraparound_straight() {
    let result = key("QsKhAd2c3s");
    assert_eq!(result.category(), HandCategory::HighCard);
}

#[test]
fn test_three_of_a_kind() {
    let result = key("QsQhQd7s3h2cKd");
    assert_eq!(result.category(), HandCategory::ThreeOfAKind);
    assert_eq!(result.tiebreak(), &[10, 11, 5]);
}

#[test]
fn test_two_pair() {
    let result = key("AsKhAdKs5c2h3d");
    assert_eq!(result.category(), HandCategory::TwoPair);
    assert_eq!(result.tiebreak(), &[12, 11, 3]);
}

#[test]
fn test_three_pairs_use_best_two() {
    let result = key("AsAh9d9c5s5h2d");
    assert_eq!(result.category(), HandCategory::TwoPair);
    assert_eq!(result.tiebreak(), &[12, 7, 3]);
}

#[test]
fn test_one_pair() {
    let result = key("AsAhKd7s3c2h5d");
    assert_eq!(result.category(), HandCategory::OnePair);
    assert_eq!(result.tiebreak(), &[12, 11, 5, 3]);
}

#[test]
fn test_high_card() {
    let result = key("AsKhQd9s3c2h5d");
    assert_eq!(result.category(), HandCategory::HighCard);
    assert_eq!(result.tiebreak(), &[12, 11, 10, 7, 3]);
}

#[test]
fn test_six_cards() {
    let result = key("AhKhQhJhTh2c");
    assert_eq!(result.category(), HandCategory::StraightFlush);
}

#[test]
fn test_not_enough_cards() {
    assert!(matches!(
        best_hand_key(&cards("AsKhQd")),
        Err(EngineError::InvalidArity(_))
    ));
}

#[test]
fn test_too_many_cards() {
    assert!(best_hand_key(&cards("AsKhQdJc9s8h7d6c")).is_err());
}

#[test]
fn test_repeated_card_rejected() {
    match best_hand_key(&cards("AhAhAhAhAh")) {
        Err(EngineError::DuplicateCard(card)) => assert_eq!(card, parse_card("Ah").unwrap()),
        other => panic!("expected DuplicateCard, got {:?}", other),
    }
}

#[test]
fn test_compare_rejects_repeat_within_hand() {
    let clean = cards("AsKd7h7c2s9d3h");
    let repeated = cards("AsAsKd7h7c2s9d");
    assert!(matches!(
        compare_hands(&clean, &repeated),
        Err(EngineError::DuplicateCard(_))
    ));
}

#[test]
fn test_flush_beats_straight() {
    let flush = cards("As2s7s6s5s4dAh");
    let straight = cards("8h9h7s6s5s4dAh");
    assert_eq!(compare_hands(&flush, &straight).unwrap(), 1);
}

#[test]
fn test_higher_pair_wins() {
    let hero = cards("AsAh2s5d8cTh3d");
    let villain = cards("KsKh2s5d8cTh3d");
    assert_eq!(compare_hands(&hero, &villain).unwrap(), 1);
    assert_eq!(compare_hands(&villain, &hero).unwrap(), -1);
}

#[test]
fn test_kicker_decides() {
    let hero = cards("AdKhAs5d8cTh3d");
    let villain = cards("AhQdAs5d8cTh3d");
    assert_eq!(compare_hands(&hero, &villain).unwrap(), 1);
}

#[test]
fn test_board_plays_tie() {
    let hero = cards("2h3dAsKdQhJsTs");
    let villain = cards("4h5dAsKdQhJsTs");
    assert_eq!(compare_hands(&hero, &villain).unwrap(), 0);
}

#[test]
fn test_self_tie() {
    let hand = cards("AsKd7h7c2s9d3h");
    assert_eq!(compare_hands(&hand, &hand).unwrap(), 0);
}

#[test]
fn test_compare_requires_seven_cards() {
    let six = cards("AsKd7h7c2s9d");
    let seven = cards("AsKd7h7c2s9d3h");
    assert!(matches!(
        compare_hands(&six, &seven),
        Err(EngineError::InvalidArity(_))
    ));
}

#[test]
fn test_category_ordering_across_hands() {
    let ladder = [
        key("As9h7d4c2s"),
        key("AsAh7d4c2s"),
        key("AsAh7d7c2s"),
        key("AsAhAd4c2s"),
        key("6s5h4d3c2s"),
        key("9s7s5s3s2s"),
        key("2s2h2d3c3s"),
        key("2s2h2d2c3s"),
        key("6s5s4s3s2s"),
    ];
    for pair in ladder.windows(2) {
        assert!(pair[1] > pair[0], "{} should beat {}", pair[1], pair[0]);
        assert_eq!(pair[1].category().index(), pair[0].category().index() + 1);
    }
}

#[test]
fn test_key_ordering_within_category() {
    assert!(key("AsAhKd4c2s") > key("AsAhQd4c2s"));
    assert!(key("KsKhQdQc2s") > key("KsKhJdJcAs"));
    assert!(key("3s3h3d2c2s") > key("2s2h2dAcAs"));
}

#[test]
fn test_stronger_categories() {
    assert_eq!(HandCategory::StraightFlush.stronger(), vec![]);
    assert_eq!(
        HandCategory::FullHouse.stronger(),
        vec![HandCategory::FourOfAKind, HandCategory::StraightFlush]
    );
    assert_eq!(HandCategory::HighCard.stronger().len(), 8);
}

#[test]
fn test_describe() {
    assert_eq!(key("KsKh5d5c2s").describe(), "Two Pair, Kings and Fives");
    assert_eq!(key("9s8h7d6c5s").describe(), "Straight, Nine high");
    assert_eq!(key("QsQhQd7c7s").describe(), "Full House, Queens full of Sevens");
    assert_eq!(key("6s6h2d2c9s").describe(), "Two Pair, Sixes and Twos");
}
