//! # holdem_coach
//!
//! A deterministic heads-up No-Limit Hold'em decision engine for coaching.
//!
//! Given one decision point (seats, stacks, hole cards, board, the action so
//! far, pot and price) the engine returns a recommended action with a mixed
//! strategy, bet size, rationale and the numbers behind it.
//!
//! ## How it works
//!
//! 1. Build a [`HandState`], by hand or by deserializing the parser's JSON.
//! 2. Call [`recommend_action`] (or [`StrategyEngine::recommend`] with a
//!    custom [`EngineConfig`]). Preflop spots are looked up in static range
//!    tables. Postflop, both players' ranges are expanded to combos, narrowed
//!    by every action they took, and compared for range and nut advantage
//!    before the street module picks a line.
//! 3. The returned [`Recommendation`] serializes to JSON; its `context`
//!    can be fed back into the next street's [`HandState::previous`].
//!
//! The engine never fails: malformed input yields a pure fold whose reason
//! carries the error text.
//!
//! ## Quick start
//!
//! ```rust
//! use holdem_coach::{
//!     recommend_action, ActionRecord, ActionVerb, Decision, HandState, Player, Position, Street,
//! };
//!
//! let mut state = HandState::new(Position::BTN, Position::BB, &["Ah", "Kh"], &["Ks", "7d", "2c"]);
//! state.actions = vec![
//!     ActionRecord::new(Street::Preflop, Player::Hero, ActionVerb::Open).sized(2.5),
//!     ActionRecord::new(Street::Preflop, Player::Villain, ActionVerb::Call).sized(2.5),
//!     ActionRecord::new(Street::Flop, Player::Villain, ActionVerb::Check),
//! ];
//! state.pot_bb = 5.5;
//!
//! let rec = recommend_action(&state);
//! assert_eq!(rec.action, Decision::Bet);
//! println!("{} | {}", rec.action_desc, rec.suggestion);
//! ```

pub mod coach_adapter;
pub mod strategy_engine;

// Convenience re-exports so callers can use `holdem_coach::recommend_action`
// directly without reaching into `strategy_engine::`.
pub use strategy_engine::{
    recommend_action, ActionMatrix, ActionRecord, ActionVerb, Card, ContinuityContext, Decision, EngineConfig,
    EngineError, HandCategory, HandState, Player, Position, Recommendation, Street, StrategyEngine,
};

#[cfg(test)]
mod tests;
