//! Heads-up decision engine: parses a [`HandState`], evaluates hand and
//! board, builds both ranges, and hands the street module's decision to
//! the formatter.
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Cards, seats, streets, input state and output records |
//! | `cards`     | Card parsing and hand codes ("AKs") |
//! | `deck`      | 52-card deck, shuffled or ordered |
//! | `board`     | Board texture and archetypes |
//! | `evaluator` | Hand category, detail tag, blockers |
//! | `ranges`    | Preflop tables, combo expansion, action filters, range history |
//! | `advantage` | Range / nut advantage and equity realization |
//! | `math`      | MDF, bluff ratio, geometric sizing, pot odds, SPR |
//! | `situation` | Everything derived once per call |
//! | `helpers`   | `StreetDecision` builders shared by the street modules |
//! | `streets`   | Preflop, flop, turn and river decisions |
//! | `formatter` | Recommendation assembly |
//! | `engine`    | `StrategyEngine` and the fold fallback |

pub mod advantage;
pub mod board;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod helpers;
pub mod math;
pub mod models;
pub mod ranges;
pub mod situation;
pub mod streets;

pub use advantage::AdvantageSummary;
pub use board::{analyze_board, Archetype, BoardInfo, DangerLevel};
pub use cards::{canonicalize_hand, parse_card, HandCode};
pub use config::EngineConfig;
pub use engine::{recommend_action, StrategyEngine};
pub use error::EngineError;
pub use evaluator::{evaluate, HandCategory, HandDetail, HandEvaluation};
pub use models::{
    ActionMatrix, ActionRecord, ActionVerb, Card, ContinuityContext, Decision, HandState, MathData, Player, Position,
    Rank, Recommendation, Street, Suit,
};
