//! Bootstrap pricing used when no trustworthy pool snapshot exists
//!
//! Indicative only. These numbers keep a UI drawable before a pool is
//! created (or after it is closed); they are never something to submit
//! against the ledger.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Floor for every quoted price, in SOL per token
pub const MIN_PRICE: Decimal = dec!(0.000001);

/// Linear bootstrap price per token of supply, in SOL
pub const LINEAR_PRICE_PER_TOKEN: Decimal = dec!(0.01);

/// Linear bootstrap curve
pub struct BootstrapCurve;

impl BootstrapCurve {
    /// `MIN_PRICE` at zero supply, `0.01 × supply` elsewhere
    pub fn price_at_supply(supply: u64) -> Decimal {
        if supply == 0 {
            return MIN_PRICE;
        }
        Decimal::from(supply) * LINEAR_PRICE_PER_TOKEN
    }

    /// `sol_in / 0.01`, saturating
    pub fn buy_return(sol_in: Decimal) -> Decimal {
        if sol_in <= dec!(0) {
            return dec!(0);
        }
        sol_in
            .checked_div(LINEAR_PRICE_PER_TOKEN)
            .unwrap_or(Decimal::MAX)
    }

    /// `tokens_in × 0.01`
    pub fn sell_return(tokens_in: Decimal) -> Decimal {
        if tokens_in <= dec!(0) {
            return dec!(0);
        }
        tokens_in * LINEAR_PRICE_PER_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_at_supply() {
        assert_eq!(BootstrapCurve::price_at_supply(0), dec!(0.000001));
        assert_eq!(BootstrapCurve::price_at_supply(1), dec!(0.01));
        assert_eq!(BootstrapCurve::price_at_supply(250_000), dec!(2500));
    }

    #[test]
    fn test_linear_returns() {
        assert_eq!(BootstrapCurve::buy_return(dec!(0.5)), dec!(50));
        assert_eq!(BootstrapCurve::sell_return(dec!(50)), dec!(0.5));
        assert_eq!(BootstrapCurve::buy_return(dec!(-1)), dec!(0));
        assert_eq!(BootstrapCurve::sell_return(dec!(0)), dec!(0));
    }

    #[test]
    fn test_buy_return_saturates() {
        assert_eq!(BootstrapCurve::buy_return(Decimal::MAX), Decimal::MAX);
    }
}
