//! Bonding-curve math with exact decimal calculations
//!
//! Virtual-reserve constant-product formulas with zero protocol fee. SOL-side
//! values are whole SOL, token-side values are raw token units. Every
//! operation is checked; an overflow is reported, never wrapped.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Failures inside the curve formulas
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("reserves must be positive")]
    NonPositiveReserves,

    #[error("input amount must be positive")]
    NonPositiveAmount,

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
}

/// Curve math functions over virtual reserves
pub struct CurveMath;

impl CurveMath {
    /// Marginal SOL cost of the next single token
    ///
    /// `price = sol_reserve / (token_reserve + 1)`. Unfloored; the engine
    /// applies the minimum-price policy.
    pub fn marginal_price(sol_reserve: Decimal, token_reserve: Decimal) -> Result<Decimal, CurveError> {
        Self::validate_reserves(sol_reserve, token_reserve)?;

        let denominator = token_reserve
            .checked_add(dec!(1))
            .ok_or(CurveError::Overflow("price denominator"))?;
        sol_reserve
            .checked_div(denominator)
            .ok_or(CurveError::DivisionByZero("price"))
    }

    /// Tokens out for `sol_in` SOL, before any supply cap
    ///
    /// `tokens_out = sol_in * token_reserve / (sol_reserve + sol_in)`, evaluated
    /// as `token_reserve * share` with the share in `[0, 1]`, so the result never
    /// exceeds the token reserve, for any input up to `Decimal::MAX`.
    pub fn tokens_out(sol_in: Decimal, sol_reserve: Decimal, token_reserve: Decimal) -> Result<Decimal, CurveError> {
        if sol_in <= dec!(0) {
            return Err(CurveError::NonPositiveAmount);
        }
        Self::validate_reserves(sol_reserve, token_reserve)?;

        let share = Self::share(sol_in, sol_reserve, "buy share")?;
        token_reserve
            .checked_mul(share)
            .ok_or(CurveError::Overflow("buy output"))
    }

    /// SOL out for `tokens_in` tokens
    ///
    /// `sol_out = tokens_in * sol_reserve / (token_reserve + tokens_in)`, in the
    /// same share form as [`CurveMath::tokens_out`].
    pub fn sol_out(tokens_in: Decimal, sol_reserve: Decimal, token_reserve: Decimal) -> Result<Decimal, CurveError> {
        if tokens_in <= dec!(0) {
            return Err(CurveError::NonPositiveAmount);
        }
        Self::validate_reserves(sol_reserve, token_reserve)?;

        let share = Self::share(tokens_in, token_reserve, "sell share")?;
        sol_reserve
            .checked_mul(share)
            .ok_or(CurveError::Overflow("sell output"))
    }

    /// Percentage deviation of `effective` from `marginal`
    ///
    /// Positive when the trade is worse than the marginal price: paying more
    /// when buying, receiving less when selling.
    pub fn deviation_pct(effective: Decimal, marginal: Decimal, buying: bool) -> Result<Decimal, CurveError> {
        if marginal.is_zero() {
            return Err(CurveError::DivisionByZero("slippage"));
        }
        let gap = if buying {
            effective.checked_sub(marginal)
        } else {
            marginal.checked_sub(effective)
        }
        .ok_or(CurveError::Overflow("slippage gap"))?;

        gap.checked_div(marginal)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or(CurveError::Overflow("slippage"))
    }

    /// `amount / (reserve + amount)`, always in `[0, 1]`
    ///
    /// Once `amount` exceeds `reserve` the equivalent `1 / (reserve / amount + 1)`
    /// is used, so the sum is never formed for huge inputs. Both forms give
    /// exactly `0.5` at `amount == reserve`, which keeps the share monotonic
    /// in `amount`.
    fn share(amount: Decimal, reserve: Decimal, op: &'static str) -> Result<Decimal, CurveError> {
        if amount <= reserve {
            let denominator = reserve.checked_add(amount).ok_or(CurveError::Overflow(op))?;
            amount.checked_div(denominator).ok_or(CurveError::DivisionByZero(op))
        } else {
            let ratio = reserve.checked_div(amount).ok_or(CurveError::DivisionByZero(op))?;
            let denominator = ratio.checked_add(dec!(1)).ok_or(CurveError::Overflow(op))?;
            dec!(1).checked_div(denominator).ok_or(CurveError::DivisionByZero(op))
        }
    }

    fn validate_reserves(sol_reserve: Decimal, token_reserve: Decimal) -> Result<(), CurveError> {
        if sol_reserve <= dec!(0) || token_reserve <= dec!(0) {
            return Err(CurveError::NonPositiveReserves);
        }
        Ok(())
    }
}
