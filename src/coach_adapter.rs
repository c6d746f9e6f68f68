//! JSON shape expected by the coaching layer.
//!
//! The coaching layer predates [`Recommendation`] and reads a flat object
//! with a few legacy keys (`recommended_action`, `reasoning`,
//! `strategic_radar`). This module builds that object.

use serde_json::{json, Value};

use crate::strategy_engine::models::{HandState, Recommendation};
use crate::strategy_engine::StrategyEngine;

/// Convert a recommendation into the coaching payload.
pub fn to_coach_payload(rec: &Recommendation) -> Value {
    let mut payload = json!({
        "street": rec.street,
        "recommended_action": rec.action.key(),
        "action_desc": rec.action_desc,
        "amount": rec.amount,
        "sizing_ratio": rec.sizing_ratio,
        "strategy_matrix": rec.strategy_matrix,
        "reasons": rec.reasons,
        "reasoning": rec.reasons,
        "suggestion": rec.suggestion,
        "stats": rec.stats,
        "hand_info": rec.hand_info,
        "strategic_radar": rec.radar,
        "math_data": rec.math_data,
        "context": rec.context,
    });
    if let (Some(size), Value::Object(map)) = (rec.size_details, &mut payload) {
        map.insert("size_details".to_string(), json!(size));
    }
    payload
}

/// Parse the parser's state JSON, run `engine`, and return the payload.
pub fn recommend_json(engine: &StrategyEngine, state_json: &str) -> serde_json::Result<Value> {
    let state: HandState = serde_json::from_str(state_json)?;
    Ok(to_coach_payload(&engine.recommend(&state)))
}
