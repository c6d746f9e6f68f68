use thiserror::Error;

/// Failures inside the recommendation pipeline.
///
/// None of these reach the caller of [`crate::StrategyEngine::recommend`]:
/// the dispatcher turns every variant into the fold fallback.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown street: {0}")]
    UnknownStreet(String),

    #[error("Hole cards are not evaluable: {0:?}")]
    HandNotEvaluable(Vec<String>),

    #[error("Board cards are not parseable: {0:?}")]
    InvalidBoard(Vec<String>),

    #[error("Card {0} appears more than once")]
    DuplicateCard(String),

    #[error("Street {street} does not match {cards} board cards")]
    BoardStreetMismatch { street: String, cards: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
