//! Assembles the caller-facing [`Recommendation`] from a street decision.

use crate::strategy_engine::advantage::{AdvantageContext, AdvantageSummary};
use crate::strategy_engine::helpers::StreetDecision;
use crate::strategy_engine::math::{calculate_mdf, round_to};
use crate::strategy_engine::models::{
    ActionMatrix, ContinuityContext, Decision, MathData, Recommendation, StrategicRadar, Street,
};
use crate::strategy_engine::ranges::combos::{sample_combos, ComboRange};
use crate::strategy_engine::situation::Situation;

// ---------------------------------------------------------------------------
// Display strings
// ---------------------------------------------------------------------------

/// "Bet 33% 90% / Check 10%": every non-negligible entry, most likely
/// first, with the size attached to the chosen action.
pub fn suggestion(matrix: &ActionMatrix, action: Decision, amount: f64, sizing_ratio: f64) -> String {
    let parts: Vec<String> = matrix
        .sorted_desc()
        .into_iter()
        .filter(|&(_, p)| p > 0.01)
        .map(|(decision, p)| {
            let mut title = decision.label().to_string();
            if decision == action && decision != Decision::Check {
                if amount > 0.0 {
                    match decision {
                        Decision::Raise => title.push_str(&format!(" to {amount:.1}bb")),
                        _ => title.push_str(&format!(" {amount:.1}bb")),
                    }
                } else if sizing_ratio > 0.0 {
                    title.push_str(&format!(" {:.0}%", sizing_ratio * 100.0));
                }
            }
            format!("{title} {}%", (p * 100.0 + 1e-9) as i64)
        })
        .collect();

    if parts.is_empty() {
        return action.to_string();
    }
    parts.join(" / ")
}

pub fn action_desc(action: Decision, amount: f64) -> String {
    if amount <= 0.0 {
        return action.to_string();
    }
    match action {
        Decision::Raise => format!("RAISE to {amount:.1}bb"),
        _ => format!("{action} {amount:.1}bb"),
    }
}

/// Pot, SPR and, when a bet is pending, the price to call.
pub fn stats(math: &MathData) -> String {
    let to_call = math.amount_to_call;
    let mut parts = Vec::new();
    if to_call > 0.0 && math.current_pot >= math.base_pot + to_call {
        parts.push(format!("Pot {:.1}bb ({} + {})", math.current_pot, math.base_pot, to_call));
    } else {
        parts.push(format!("Pot {:.1}bb", math.current_pot));
    }
    parts.push(format!("SPR {:.1}", math.spr));

    if to_call > 0.0 && math.pot_odds > 0.0 {
        let odds = math.pot_odds;
        parts.push(format!("To call {to_call:.1}bb"));
        parts.push(format!("Pot odds {:.1}% (1:{:.1})", odds * 100.0, 1.0 / odds - 1.0));
    }
    parts.join(" / ")
}

pub fn radar(situation: &Situation, summary: &AdvantageSummary) -> StrategicRadar {
    StrategicRadar {
        danger_meter: situation.board_info.danger.to_string(),
        synergy_balance: format!("Hero {:+} / Villain {:+}", situation.hero_synergy, situation.villain_synergy),
        advantage_summary: format!(
            "Range: {:.2} | Realized: {:.2} | Nut: {:.2}",
            summary.range_advantage, summary.realized_range_advantage, summary.nut_advantage
        ),
        realization_balance: format!("Realization: H {:.2} / V {:.2}", summary.hero_rf, summary.villain_rf),
    }
}

fn hand_info(situation: &Situation) -> String {
    let eval = situation.evaluation;
    match eval.detail.as_str() {
        "" => eval.category.to_string(),
        detail => format!("{} ({detail})", eval.category),
    }
}

fn combo_sample(range: &ComboRange, limit: usize) -> String {
    sample_combos(range, limit)
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn math_data(situation: &Situation, advantage: Option<&AdvantageContext>) -> MathData {
    let state = situation.state;
    let base_pot = round_to(situation.base_pot(), 2);
    let mut math = MathData {
        street: Some(situation.street),
        base_pot,
        current_pot: situation.pot,
        amount_to_call: situation.to_call,
        pot_odds: round_to(situation.pot_odds, 4),
        spr: situation.spr,
        mdf: (situation.street != Street::Preflop && situation.to_call > 0.0)
            .then(|| round_to(calculate_mdf(base_pot, situation.to_call), 4)),
        note: format!("Tables: H:{} vs V:{}", state.hero_position, state.villain_position),
        ..MathData::default()
    };

    if let Some(adv) = advantage {
        let limit = situation.config.sample_combo_limit;
        math.hero_range_summary = Some(adv.report.hero.clone());
        math.villain_range_summary = Some(adv.report.villain.clone());
        math.advantage = Some(*adv.summary());
        math.hero_combos_sample = combo_sample(&adv.ranges.hero, limit);
        math.villain_combos_sample = combo_sample(&adv.ranges.villain, limit);
        math.note = format!(
            "Model: {}, H:{} vs V:{}",
            adv.ranges.pot_type, state.hero_position, state.villain_position
        );
    }
    math
}

pub fn build(situation: &Situation, advantage: Option<&AdvantageContext>, decision: StreetDecision) -> Recommendation {
    let math = math_data(situation, advantage);
    let summary = advantage.map(|a| *a.summary());

    let context = ContinuityContext {
        hand_category: Some(situation.effective),
        kicker_strength: Some(situation.evaluation.detail),
        spr: situation.spr,
        adv_ratio: summary.map_or(0.0, |s| s.range_advantage),
        advantage_data: summary,
        preflop_aggressor: decision.preflop_aggressor.or(situation.preflop_aggressor),
    };

    Recommendation {
        street: situation.street.to_string(),
        action: decision.action,
        action_desc: action_desc(decision.action, decision.amount),
        amount: decision.amount,
        sizing_ratio: decision.sizing_ratio,
        suggestion: suggestion(&decision.matrix, decision.action, decision.amount, decision.sizing_ratio),
        stats: stats(&math),
        hand_info: hand_info(situation),
        radar: summary.map(|s| radar(situation, &s)),
        size_details: decision.size_details,
        strategy_matrix: decision.matrix,
        reasons: decision.reasons,
        math_data: math,
        context,
    }
}

/// Fold-biased result for a state the engine could not process.
pub fn fallback(street: &str, detail: &str) -> Recommendation {
    let matrix = ActionMatrix::pure(Decision::Fold);
    Recommendation {
        street: street.trim().to_lowercase(),
        action: Decision::Fold,
        action_desc: action_desc(Decision::Fold, 0.0),
        amount: 0.0,
        sizing_ratio: 0.0,
        suggestion: suggestion(&matrix, Decision::Fold, 0.0, 0.0),
        strategy_matrix: matrix,
        reasons: vec![format!("Strategy engine error: {detail}")],
        stats: String::new(),
        hand_info: String::new(),
        size_details: None,
        radar: None,
        math_data: MathData::default(),
        context: ContinuityContext::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_lists_sized_choice_first() {
        let m = ActionMatrix::new(&[(Decision::Check, 0.1), (Decision::Bet, 0.9)]);
        assert_eq!(suggestion(&m, Decision::Bet, 1.82, 0.33), "Bet 1.8bb 90% / Check 10%");
        assert_eq!(suggestion(&m, Decision::Bet, 0.0, 0.33), "Bet 33% 90% / Check 10%");

        let raise = ActionMatrix::new(&[(Decision::Raise, 0.5), (Decision::Fold, 0.5)]);
        assert_eq!(suggestion(&raise, Decision::Raise, 2.5, 0.0), "Raise to 2.5bb 50% / Fold 50%");
    }

    #[test]
    fn suggestion_skips_negligible_entries() {
        let m = ActionMatrix::new(&[(Decision::Call, 0.995), (Decision::Fold, 0.005)]);
        assert_eq!(suggestion(&m, Decision::Call, 0.0, 0.0), "Call 99%");
    }

    #[test]
    fn action_descriptions() {
        assert_eq!(action_desc(Decision::Raise, 7.5), "RAISE to 7.5bb");
        assert_eq!(action_desc(Decision::Bet, 1.82), "BET 1.8bb");
        assert_eq!(action_desc(Decision::Check, 0.0), "CHECK");
    }

    #[test]
    fn stats_show_price_when_facing_a_bet() {
        let math = MathData {
            base_pot: 5.5,
            current_pot: 9.0,
            amount_to_call: 3.5,
            pot_odds: 0.28,
            spr: 10.83,
            ..MathData::default()
        };
        assert_eq!(
            stats(&math),
            "Pot 9.0bb (5.5 + 3.5) / SPR 10.8 / To call 3.5bb / Pot odds 28.0% (1:2.6)"
        );

        let unbet = MathData { current_pot: 5.5, spr: 17.73, ..MathData::default() };
        assert_eq!(stats(&unbet), "Pot 5.5bb / SPR 17.7");
    }

    #[test]
    fn fallback_folds() {
        let rec = fallback(" Showdown ", "unknown street: Showdown");
        assert_eq!(rec.street, "showdown");
        assert_eq!(rec.action, Decision::Fold);
        assert_eq!(rec.action_desc, "FOLD");
        assert_eq!(rec.suggestion, "Fold 100%");
        assert_eq!(rec.reasons, vec!["Strategy engine error: unknown street: Showdown".to_string()]);
    }
}
