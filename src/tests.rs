//! End-to-end tests for the `holdem_coach` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Scenarios | Top pair c-bet, board-only flush, preflop fold out of range |
//! | Fallback | Unknown street and bad cards still produce a fold |
//! | Seeded deals | Every street on random deals: matrices sum to 1, action is the matrix best |
//! | Continuity | The context of one street feeds the next |
//! | Serialization | Recommendation JSON shape |

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::strategy_engine::deck::Deck;
use crate::strategy_engine::math::bluff_ratio;
use crate::{
    recommend_action, ActionRecord, ActionVerb, Decision, HandCategory, HandState, Player, Position, Street,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Hero opens 2.5bb, villain calls, both 97.5bb behind.
fn single_raised(hero: Position, villain: Position, hole: &[&str], board: &[&str]) -> HandState {
    let mut state = HandState::new(hero, villain, hole, board);
    state.actions = vec![
        ActionRecord::new(Street::Preflop, Player::Hero, ActionVerb::Open).sized(2.5),
        ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Call).sized(2.5),
    ];
    state.pot_bb = 5.5;
    state.hero_stack_bb = 97.5;
    state.villain_stack_bb = 97.5;
    state
}

const SEEDS: [u64; 6] = [1, 7, 42, 999, 2024, 0xDEAD_BEEF];

const MATCHUPS: [(Position, Position); 5] = [
    (Position::BTN, Position::BB),
    (Position::BB, Position::BTN),
    (Position::CO, Position::BTN),
    (Position::SB, Position::BB),
    (Position::UTG, Position::BB),
];

fn strs(cards: &[crate::Card]) -> Vec<String> {
    cards.iter().map(|c| c.to_string()).collect()
}

// ── scenarios ────────────────────────────────────────────────────────────────

#[test]
fn top_pair_top_kicker_cbets_small_on_dry_king() {
    let mut state = single_raised(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
    state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check));

    let rec = recommend_action(&state);
    assert_eq!(rec.street, "flop");
    assert_eq!(rec.action, Decision::Bet);
    assert_eq!(rec.sizing_ratio, 0.33);
    assert_eq!(rec.context.hand_category, Some(HandCategory::TopPair));
    assert_eq!(rec.hand_info, "top_pair (top_kicker)");
    assert!(rec.math_data.note.starts_with("Model: SRP"));
    assert!(rec.suggestion.starts_with("Bet"));
    assert!(rec.reasons.iter().any(|r| r.contains("33%")));
    assert!(rec.radar.is_some());
}

#[test]
fn board_flush_without_hero_suit_is_flagged() {
    let mut state = HandState::new(Position::BTN, Position::BB, &["2h", "2d"], &["As", "Ks", "Qs", "7s", "3s"]);
    state.pot_bb = 10.0;
    let rec = recommend_action(&state);
    assert_eq!(rec.hand_info, "flush (board_flush)");
    assert_eq!(rec.context.hand_category, Some(HandCategory::TopPair));
}

#[test]
fn board_straight_flush_keeps_its_category() {
    let mut state = HandState::new(Position::BTN, Position::BB, &["2h", "3d"], &["9s", "Ts", "Js", "Qs", "Ks"]);
    state.pot_bb = 10.0;
    let rec = recommend_action(&state);
    assert_eq!(rec.hand_info, "straight_flush (board_straight_flush)");
    assert_eq!(rec.context.hand_category, Some(HandCategory::StraightFlush));
}

#[test]
fn button_folds_nines_against_utg_open() {
    let mut state = HandState::new(Position::BTN, Position::UTG, &["9c", "9s"], &[]);
    state.actions = vec![ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Open).sized(2.3)];
    state.pot_bb = 3.8;
    state.amount_to_call = 2.3;

    let rec = recommend_action(&state);
    assert_eq!(rec.action, Decision::Fold);
    assert_eq!(rec.action_desc, "FOLD");
    assert!(rec.reasons.iter().any(|r| r.contains("not in range")));
    assert!(rec.radar.is_none());
}

#[test]
fn bluff_ratios_match_indifference_points() {
    for (size, expected) in [(1.0 / 3.0, 0.20), (0.5, 0.25), (0.75, 0.30), (1.0, 1.0 / 3.0)] {
        assert!((bluff_ratio(size) - expected).abs() < 1e-3, "size {size}");
    }
}

// ── fallback ─────────────────────────────────────────────────────────────────

#[test]
fn unknown_street_returns_fold_fallback() {
    let mut state = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
    state.street = "showdown".to_string();
    let rec = recommend_action(&state);
    assert_eq!(rec.action, Decision::Fold);
    assert_eq!(rec.suggestion, "Fold 100%");
    assert!(rec.reasons[0].starts_with("Strategy engine error:"));
}

#[test]
fn garbage_hole_cards_return_fold_fallback() {
    let state = HandState::new(Position::BTN, Position::BB, &["Ahh"], &[]);
    let rec = recommend_action(&state);
    assert_eq!(rec.action, Decision::Fold);
    assert!((rec.strategy_matrix.total() - 1.0).abs() < 1e-9);
}

// ── seeded deals ─────────────────────────────────────────────────────────────

#[test]
fn seeded_deals_produce_valid_recommendations() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        for board_len in [0usize, 3, 4, 5] {
            for (hero, villain) in MATCHUPS {
                let mut deck = Deck::new_shuffled(&mut rng);
                let hole = deck.deal_n(2);
                let board = deck.deal_n(board_len);

                let (hole_s, board_s) = (strs(&hole), strs(&board));
                let hole_refs: Vec<&str> = hole_s.iter().map(String::as_str).collect();
                let board_refs: Vec<&str> = board_s.iter().map(String::as_str).collect();

                let mut state = if board_len == 0 {
                    let mut s = HandState::new(hero, villain, &hole_refs, &[]);
                    s.amount_to_call = 1.0;
                    s
                } else {
                    single_raised(hero, villain, &hole_refs, &board_refs)
                };
                if board_len > 0 && rng.gen_bool(0.5) {
                    let street = state.street.parse::<Street>().unwrap();
                    state.actions.push(ActionRecord::new(street, Player::Villain, ActionVerb::Bet).sized(3.0));
                    state.pot_bb = 8.5;
                    state.amount_to_call = 3.0;
                }

                let rec = recommend_action(&state);
                let ctx = format!("seed={seed} board={board:?} hole={hole:?} {hero} vs {villain}");
                assert!(!rec.reasons[0].starts_with("Strategy engine error"), "{ctx}: {:?}", rec.reasons);
                assert!((rec.strategy_matrix.total() - 1.0).abs() < 1e-6, "{ctx}");
                assert_eq!(rec.action, rec.strategy_matrix.best(), "{ctx}");
                assert!(rec.amount >= 0.0, "{ctx}");
                if matches!(rec.action, Decision::Fold | Decision::Check) {
                    assert_eq!(rec.amount, 0.0, "{ctx}");
                }
                if rec.action == Decision::Call {
                    assert_eq!(rec.amount, state.amount_to_call, "{ctx}");
                }
                assert!(rec.context.hand_category.is_some(), "{ctx}");
            }
        }
    }
}

#[test]
fn seeded_deals_are_deterministic() {
    let deal = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Deck::new_shuffled(&mut rng);
        let hole = strs(&deck.deal_n(2));
        let board = strs(&deck.deal_n(3));
        let mut state = single_raised(Position::CO, Position::BB, &[], &[]);
        state.hero_cards = hole;
        state.board_cards = board;
        state.street = "flop".to_string();
        recommend_action(&state)
    };
    for seed in SEEDS {
        let (a, b) = (deal(seed), deal(seed));
        assert_eq!(a.action, b.action);
        assert_eq!(a.reasons, b.reasons);
        assert_eq!(a.strategy_matrix, b.strategy_matrix);
    }
}

// ── continuity ───────────────────────────────────────────────────────────────

#[test]
fn preflop_context_names_the_aggressor_for_later_streets() {
    let mut preflop = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &[]);
    preflop.amount_to_call = 1.0;
    let opened = recommend_action(&preflop);
    assert_eq!(opened.action, Decision::Raise);
    assert_eq!(opened.context.preflop_aggressor, Some(Player::Hero));

    // The flop state carries no preflop actions, only the previous context.
    let mut flop = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
    flop.pot_bb = 5.5;
    flop.previous = Some(opened.context.clone());
    let rec = recommend_action(&flop);
    assert_eq!(rec.context.preflop_aggressor, Some(Player::Hero));
    assert!(rec.math_data.note.starts_with("Model: SRP"));
}

// ── serialization ────────────────────────────────────────────────────────────

#[test]
fn recommendation_serializes_to_expected_json() {
    let mut state = single_raised(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
    state.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check));
    let json = serde_json::to_value(recommend_action(&state)).unwrap();

    assert_eq!(json["action"], "bet");
    assert!(json["strategy_matrix"].is_object());
    assert!(json["strategy_matrix"]["bet"].is_number());
    assert_eq!(json["context"]["hand_category"], "top_pair");
    assert_eq!(json["context"]["kicker_strength"], "top_kicker");
    assert_eq!(json["math_data"]["street"], "flop");
    assert!(json["math_data"]["hero_range_summary"]["buckets"].is_object());
}
