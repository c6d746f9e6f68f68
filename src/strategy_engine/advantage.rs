//! Range and nut advantage between hero and villain, corrected for how
//! well each side realizes its equity.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::strategy_engine::board::{Archetype, BoardInfo};
use crate::strategy_engine::config::EngineConfig;
use crate::strategy_engine::math::round_to;
use crate::strategy_engine::models::{Card, Position};
use crate::strategy_engine::ranges::analyzer::{nut_combos, score, summarize, RangeSummary};
use crate::strategy_engine::ranges::combos::ComboRange;
use crate::strategy_engine::ranges::history::{build_ranges, RangePair};
use crate::strategy_engine::situation::Situation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvantageSummary {
    pub range_advantage: f64,
    pub realized_range_advantage: f64,
    pub nut_advantage: f64,
    pub hero_score: f64,
    pub villain_score: f64,
    pub hero_rf: f64,
    pub villain_rf: f64,
}

impl Default for AdvantageSummary {
    fn default() -> Self {
        AdvantageSummary {
            range_advantage: 1.0,
            realized_range_advantage: 1.0,
            nut_advantage: 1.0,
            hero_score: 0.5,
            villain_score: 0.5,
            hero_rf: 1.0,
            villain_rf: 1.0,
        }
    }
}

/// Equity realization multiplier around 1.0.
///
/// Position is worth +0.15 / -0.10, dynamic boards widen the gap, low SPR
/// pulls the factor back toward 1.0 and deep stacks widen it again.
pub fn realization_factor(position: Option<Position>, is_ip: bool, board: &BoardInfo, spr: f64) -> f64 {
    if position.is_none() {
        return 1.0;
    }
    let sign = if is_ip { 1.0 } else { -1.0 };
    let mut factor = if is_ip { 1.15 } else { 0.90 };

    if board.is_dynamic || board.connectedness_score >= 60 {
        factor += 0.05 * sign;
    }

    if spr < 2.0 {
        let convergence = ((2.0 - spr) / 2.0).clamp(0.0, 1.0);
        factor = factor * (1.0 - convergence) + convergence;
    } else if spr > 15.0 {
        factor += 0.05 * sign;
    }

    round_to(factor, 3)
}

/// How well a seat's preflop range fits the board. Positive favours the
/// seat.
pub fn synergy(position: Position, board: &BoardInfo) -> i32 {
    if board.archetypes.is_empty() {
        return 0;
    }
    let high = board.high_value();
    let mut score = 0;

    if board.has(Archetype::BroadwayDry) || board.has(Archetype::AHighDry) {
        if position.is_offensive() {
            score += 30;
        } else if position == Position::BB {
            score -= 20;
        }
    }

    if high <= 9 && board.connectedness_score >= 60 {
        if position == Position::BB {
            score += 40;
        } else if position.is_tight() {
            score -= 30;
        }
    }

    if board.has(Archetype::LowPaired) || board.has(Archetype::TripsBoard) {
        if position == Position::BB {
            score += 20;
        } else if position.is_tight() {
            score -= 10;
        }
    }

    let low_connected = board.has(Archetype::Connected) && high <= 7;
    if (board.has(Archetype::WheelBoard) || low_connected)
        && matches!(position, Position::BTN | Position::SB | Position::BB)
    {
        score += 25;
    }

    score
}

#[derive(Debug, Clone)]
pub struct AdvantageReport {
    pub summary: AdvantageSummary,
    pub hero: RangeSummary,
    pub villain: RangeSummary,
}

/// Compare two combo ranges on `board`. `factors` are the hero and villain
/// realization factors; pass `(1.0, 1.0)` to skip the correction.
pub fn compute_advantage(
    hero_range: &ComboRange,
    villain_range: &ComboRange,
    board: &[Card],
    factors: (f64, f64),
    config: &EngineConfig,
) -> AdvantageReport {
    let hero = summarize(hero_range, board);
    let villain = summarize(villain_range, board);

    let hero_score = score(&hero);
    let villain_score = score(&villain);
    let range_advantage = if villain_score > 0.0 { hero_score / villain_score } else { 1.0 };

    let (hero_rf, villain_rf) = factors;
    let realized = if villain_rf > 0.0 { range_advantage * hero_rf / villain_rf } else { range_advantage };

    let (hero_nuts, villain_nuts) = (nut_combos(&hero), nut_combos(&villain));
    let nut_advantage = if villain_nuts > 0.0 {
        hero_nuts / villain_nuts
    } else if hero_nuts > 0.0 {
        config.hero_only_nut_advantage
    } else {
        1.0
    };

    let summary = AdvantageSummary {
        range_advantage: round_to(range_advantage, 2),
        realized_range_advantage: round_to(realized, 2),
        nut_advantage: round_to(nut_advantage.min(config.nut_advantage_cap), 2),
        hero_score: round_to(hero_score, 2),
        villain_score: round_to(villain_score, 2),
        hero_rf,
        villain_rf,
    };
    AdvantageReport { summary, hero, villain }
}

/// Ranges plus their advantage figures for one decision.
#[derive(Debug, Clone)]
pub struct AdvantageContext {
    pub ranges: RangePair,
    pub report: AdvantageReport,
}

impl AdvantageContext {
    pub fn build(situation: &Situation) -> AdvantageContext {
        let state = situation.state;
        let hero_rf = realization_factor(
            Some(state.hero_position),
            situation.hero_is_ip,
            &situation.board_info,
            situation.spr,
        );
        let villain_rf = realization_factor(
            Some(state.villain_position),
            !situation.hero_is_ip,
            &situation.board_info,
            situation.spr,
        );

        let ranges = build_ranges(situation);
        let report = compute_advantage(
            &ranges.hero,
            &ranges.villain,
            &situation.board,
            (hero_rf, villain_rf),
            situation.config,
        );
        debug!(
            "range adv {:.2} (realized {:.2}), nut adv {:.2}, rf {hero_rf}/{villain_rf}",
            report.summary.range_advantage, report.summary.realized_range_advantage, report.summary.nut_advantage
        );
        AdvantageContext { ranges, report }
    }

    pub fn summary(&self) -> &AdvantageSummary {
        &self.report.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy_engine::board::analyze_board;
    use crate::strategy_engine::cards::{parse_card, HandCode};
    use crate::strategy_engine::ranges::combos::{expand_to_combos, CodeRange};

    fn board(cards: &[&str]) -> Vec<Card> {
        cards.iter().map(|c| parse_card(c).unwrap()).collect()
    }

    #[test]
    fn realization_factor_by_position_and_spr() {
        let dry = analyze_board(&board(&["Ks", "7d", "2c"]));
        assert_eq!(realization_factor(Some(Position::BTN), true, &dry, 10.0), 1.15);
        assert_eq!(realization_factor(Some(Position::BB), false, &dry, 10.0), 0.9);
        assert_eq!(realization_factor(Some(Position::BTN), true, &dry, 20.0), 1.2);
        assert_eq!(realization_factor(Some(Position::BTN), true, &dry, 0.0), 1.0);
        assert_eq!(realization_factor(None, true, &dry, 10.0), 1.0);

        let wet = analyze_board(&board(&["9h", "8h", "7c"]));
        assert_eq!(realization_factor(Some(Position::BB), false, &wet, 10.0), 0.85);
    }

    #[test]
    fn synergy_favours_raiser_on_dry_high_boards() {
        let dry = analyze_board(&board(&["Ks", "7d", "2c"]));
        assert_eq!(synergy(Position::BTN, &dry), 30);
        assert_eq!(synergy(Position::BB, &dry), -20);
        assert_eq!(synergy(Position::SB, &dry), 0);

        let low = analyze_board(&board(&["7h", "6h", "5c"]));
        assert_eq!(synergy(Position::BB, &low), 40 + 25);
        assert_eq!(synergy(Position::UTG, &low), -30);
        assert_eq!(synergy(Position::BTN, &low), 25);
    }

    #[test]
    fn nut_advantage_defaults_and_cap() {
        let cfg = EngineConfig::default();
        let b = board(&["Ks", "7d", "2c"]);
        let sets: CodeRange = [(HandCode::parse("77").unwrap(), 1.0)].into_iter().collect();
        let air: CodeRange = [(HandCode::parse("QJs").unwrap(), 1.0)].into_iter().collect();
        let hero = expand_to_combos(&sets, &b);
        let villain = expand_to_combos(&air, &b);

        let report = compute_advantage(&hero, &villain, &b, (1.0, 1.0), &cfg);
        assert_eq!(report.summary.nut_advantage, 2.0);
        assert_eq!(report.summary.range_advantage, 8.0);

        let neither = compute_advantage(&villain, &villain, &b, (1.0, 1.0), &cfg);
        assert_eq!(neither.summary.nut_advantage, 1.0);
        assert_eq!(neither.summary.range_advantage, 1.0);
    }

    #[test]
    fn realized_advantage_scales_by_factors() {
        let cfg = EngineConfig::default();
        let b = board(&["Ks", "7d", "2c"]);
        let r: CodeRange = [(HandCode::parse("AKs").unwrap(), 1.0)].into_iter().collect();
        let combos = expand_to_combos(&r, &b);
        let report = compute_advantage(&combos, &combos, &b, (1.15, 0.9), &cfg);
        assert_eq!(report.summary.range_advantage, 1.0);
        assert_eq!(report.summary.realized_range_advantage, 1.28);
    }
}
