//! Pot geometry formulas.

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Minimum defense frequency against a bet of `bet` into `pot`.
pub fn calculate_mdf(pot: f64, bet: f64) -> f64 {
    let total = pot + bet;
    if total <= 0.0 {
        return 1.0;
    }
    pot / total
}

/// Share of bluffs in a polarized betting range that makes the caller
/// indifferent at a bet of `ratio` times the pot.
pub fn bluff_ratio(ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }
    ratio / (1.0 + 2.0 * ratio)
}

/// Per-street pot fraction that gets the stacks in over `streets` equal bets.
pub fn geometric_sizing(spr: f64, streets: u32) -> f64 {
    if spr <= 0.0 || streets == 0 {
        return 0.75;
    }
    round_to((1.0 + spr).powf(1.0 / streets as f64) - 1.0, 3)
}

pub fn pot_odds(pot: f64, to_call: f64) -> f64 {
    let total = pot + to_call;
    if to_call <= 0.0 || total <= 0.0 {
        return 0.0;
    }
    to_call / total
}

/// Stack-to-pot ratio, `zero_pot` when the pot is empty.
pub fn stack_to_pot(stack: f64, pot: f64, zero_pot: f64) -> f64 {
    if pot <= 0.0 {
        return zero_pot;
    }
    round_to(stack / pot, 2)
}
