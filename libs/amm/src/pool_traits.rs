//! Curve pool trait for unified pricing over snapshots

use crate::curve_math::{CurveError, CurveMath};
use rust_decimal::Decimal;
use types::PoolState;

/// Pricing view of one bonding-curve pool
pub trait CurvePool {
    /// Virtual reserves as (SOL, tokens)
    fn reserves(&self) -> (Decimal, Decimal);

    /// Tokens still available for purchase
    fn remaining_supply(&self) -> Decimal;

    /// Marginal price of the next token, unfloored
    fn marginal_price(&self) -> Result<Decimal, CurveError> {
        let (sol, tokens) = self.reserves();
        CurveMath::marginal_price(sol, tokens)
    }

    /// Tokens bought for `sol_in` SOL, capped at the remaining supply
    fn buy_return(&self, sol_in: Decimal) -> Result<Decimal, CurveError> {
        let (sol, tokens) = self.reserves();
        let raw = CurveMath::tokens_out(sol_in, sol, tokens)?;
        Ok(raw.min(self.remaining_supply()))
    }

    /// SOL received for `tokens_in` tokens, uncapped
    fn sell_return(&self, tokens_in: Decimal) -> Result<Decimal, CurveError> {
        let (sol, tokens) = self.reserves();
        CurveMath::sol_out(tokens_in, sol, tokens)
    }
}

impl CurvePool for PoolState {
    fn reserves(&self) -> (Decimal, Decimal) {
        (
            self.virtual_sol_reserve_sol(),
            Decimal::from(self.virtual_token_reserve()),
        )
    }

    fn remaining_supply(&self) -> Decimal {
        Decimal::from(self.supply_remaining())
    }
}
