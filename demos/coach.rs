//! Walk one hand through every street.
//!
//! Run with: `RUST_LOG=debug cargo run --example coach`
//!
//! Hero opens AhKh on the button, gets called by the big blind and plays a
//! K-7-2 flop, a blank turn and a river where villain leads. Each street
//! prints the recommendation, then the last one is shown as the coaching
//! payload.

use holdem_coach::coach_adapter::to_coach_payload;
use holdem_coach::{
    ActionRecord, ActionVerb, HandState, Player, Position, Recommendation, Street, StrategyEngine,
};

fn print_recommendation(rec: &Recommendation) {
    println!("── {} ─────────────────────────────────────────", rec.street.to_uppercase());
    println!("  Hand:       {}", rec.hand_info);
    println!("  Action:     {}", rec.action_desc);
    println!("  Strategy:   {}", rec.suggestion);
    println!("  Stats:      {}", rec.stats);
    if let Some(radar) = &rec.radar {
        println!("  Board:      {}", radar.danger_meter);
        println!("  Advantage:  {}", radar.advantage_summary);
    }
    for reason in &rec.reasons {
        println!("    - {reason}");
    }
    println!();
}

fn main() {
    env_logger::init();
    let engine = StrategyEngine::default();

    let open = ActionRecord::new(Street::Preflop, Player::Hero, ActionVerb::Open).sized(2.5);
    let call = ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Call).sized(2.5);

    let mut preflop = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &[]);
    preflop.pot_bb = 1.5;
    preflop.amount_to_call = 1.0;
    let rec = engine.recommend(&preflop);
    print_recommendation(&rec);

    let mut flop = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
    flop.actions = vec![open.clone(), call.clone(), ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check)];
    flop.pot_bb = 5.5;
    flop.hero_stack_bb = 97.5;
    flop.villain_stack_bb = 97.5;
    let rec = engine.recommend(&flop);
    print_recommendation(&rec);

    let mut turn = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c", "4h"]);
    turn.actions = flop.actions.clone();
    turn.actions.push(ActionRecord::new(Street::Flop, Player::Hero, ActionVerb::Bet).sized(1.8));
    turn.actions.push(ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Call).sized(1.8));
    turn.actions.push(ActionRecord::new(Street::Turn, Player::Villain, ActionVerb::Check));
    turn.pot_bb = 9.1;
    turn.hero_stack_bb = 95.7;
    turn.villain_stack_bb = 95.7;
    turn.previous = Some(rec.context.clone());
    let rec = engine.recommend(&turn);
    print_recommendation(&rec);

    let mut river = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c", "4h", "9s"]);
    river.actions = turn.actions.clone();
    river.actions.push(ActionRecord::new(Street::Turn, Player::Hero, ActionVerb::Bet).sized(6.8));
    river.actions.push(ActionRecord::new(Street::Turn, Player::Villain, ActionVerb::Call).sized(6.8));
    river.actions.push(ActionRecord::new(Street::River, Player::Villain, ActionVerb::Bet).sized(12.0));
    river.pot_bb = 34.7;
    river.amount_to_call = 12.0;
    river.hero_stack_bb = 88.9;
    river.villain_stack_bb = 76.9;
    river.previous = Some(rec.context.clone());
    let rec = engine.recommend(&river);
    print_recommendation(&rec);

    match serde_json::to_string_pretty(&to_coach_payload(&rec)) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("could not serialize payload: {err}"),
    }
}
