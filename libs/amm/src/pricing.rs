//! Pricing engine over optional pool snapshots
//!
//! Every function is pure and total: it takes an optional [`PoolState`] and
//! always returns a number. `None` (no pool, closed pool, corrupt or
//! unreachable snapshot) selects the [`BootstrapCurve`]. A trade computation
//! that fails on a real snapshot saturates at the pool's own limits instead,
//! and the returned [`Quote`] records which of these happened.
//!
//! Units: SOL amounts are whole SOL, token amounts are raw token units,
//! prices are SOL per token.

use crate::curve_math::{CurveError, CurveMath};
use crate::fallback::{BootstrapCurve, MIN_PRICE};
use crate::pool_traits::CurvePool;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::PoolState;

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Why a quote came from the bootstrap curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No snapshot was supplied
    NoPool,
    /// The snapshot was supplied but the curve math failed
    Computation(String),
}

/// Provenance of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum QuoteSource {
    /// Computed from a validated pool snapshot
    Pool,
    /// Bootstrap approximation, indicative only
    Fallback(FallbackReason),
}

/// A single advisory number plus where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub value: Decimal,
    #[serde(flatten)]
    pub source: QuoteSource,
}

impl Quote {
    fn pool(value: Decimal) -> Self {
        Self {
            value,
            source: QuoteSource::Pool,
        }
    }

    fn fallback(value: Decimal, reason: FallbackReason) -> Self {
        Self {
            value,
            source: QuoteSource::Fallback(reason),
        }
    }

    /// Bootstrap quotes must never be submitted against the ledger
    pub fn is_indicative(&self) -> bool {
        matches!(self.source, QuoteSource::Fallback(_))
    }
}

fn computation_fallback(op: &'static str, err: CurveError, value: Decimal) -> Quote {
    debug!(op, error = %err, "Curve computation failed, using bootstrap value");
    Quote::fallback(value, FallbackReason::Computation(err.to_string()))
}

fn neutral(pool: Option<&PoolState>) -> Quote {
    match pool {
        Some(_) => Quote::pool(dec!(0)),
        None => Quote::fallback(dec!(0), FallbackReason::NoPool),
    }
}

/// Current marginal price, floored at [`MIN_PRICE`]
pub fn quote_price(pool: Option<&PoolState>) -> Quote {
    quote_price_at_supply(0, pool)
}

/// Price at a hypothetical circulating `supply`
///
/// A pool-backed price depends only on the snapshot's reserves, so `supply`
/// only moves the bootstrap curve.
pub fn quote_price_at_supply(supply: u64, pool: Option<&PoolState>) -> Quote {
    let Some(pool) = pool else {
        return Quote::fallback(BootstrapCurve::price_at_supply(supply), FallbackReason::NoPool);
    };

    match pool.marginal_price() {
        Ok(price) => Quote::pool(price.max(MIN_PRICE)),
        Err(err) => computation_fallback("price", err, BootstrapCurve::price_at_supply(supply)),
    }
}

/// Tokens received for `sol_in` SOL, capped at the pool's remaining supply
pub fn quote_buy(sol_in: Decimal, pool: Option<&PoolState>) -> Quote {
    if sol_in <= dec!(0) {
        return neutral(pool);
    }
    let Some(pool) = pool else {
        return Quote::fallback(BootstrapCurve::buy_return(sol_in), FallbackReason::NoPool);
    };

    match pool.buy_return(sol_in) {
        Ok(tokens) => Quote::pool(tokens),
        // The curve tends to its whole token reserve, never past the cap
        Err(err) => computation_fallback("buy_return", err, pool.remaining_supply().min(pool.reserves().1)),
    }
}

/// SOL received for `tokens_in` tokens
pub fn quote_sell(tokens_in: Decimal, pool: Option<&PoolState>) -> Quote {
    if tokens_in <= dec!(0) {
        return neutral(pool);
    }
    let Some(pool) = pool else {
        return Quote::fallback(BootstrapCurve::sell_return(tokens_in), FallbackReason::NoPool);
    };

    match pool.sell_return(tokens_in) {
        Ok(sol) => Quote::pool(sol),
        // The curve tends to its whole SOL reserve
        Err(err) => computation_fallback("sell_return", err, pool.reserves().0),
    }
}

/// Slippage in percent between the marginal price and the effective price
/// of a trade of `amount` (SOL when buying, tokens when selling)
///
/// Any zero denominator reports no slippage; a deviation too large for
/// `Decimal` saturates at `Decimal::MAX`.
pub fn quote_slippage(amount: Decimal, side: TradeSide, pool: Option<&PoolState>) -> Quote {
    if amount <= dec!(0) {
        return neutral(pool);
    }

    let marginal = quote_price(pool);
    let trade = match side {
        TradeSide::Buy => quote_buy(amount, pool),
        TradeSide::Sell => quote_sell(amount, pool),
    };
    let source = match (&marginal.source, &trade.source) {
        (QuoteSource::Fallback(reason), _) | (_, QuoteSource::Fallback(reason)) => {
            QuoteSource::Fallback(reason.clone())
        }
        _ => QuoteSource::Pool,
    };

    let effective = match side {
        // SOL paid per token
        TradeSide::Buy => amount.checked_div(trade.value),
        // SOL received per token
        TradeSide::Sell => trade.value.checked_div(amount),
    };

    let value = effective
        .ok_or(CurveError::DivisionByZero("effective price"))
        .and_then(|effective| {
            CurveMath::deviation_pct(effective, marginal.value, side == TradeSide::Buy)
        })
        .unwrap_or_else(|err| match err {
            CurveError::Overflow(_) => {
                debug!(error = %err, "Slippage beyond range, saturating");
                Decimal::MAX
            }
            _ => {
                debug!(error = %err, "Slippage undefined, reporting none");
                dec!(0)
            }
        });

    Quote { value, source }
}

/// Current marginal price, floored at [`MIN_PRICE`]
pub fn price(pool: Option<&PoolState>) -> Decimal {
    quote_price(pool).value
}

/// Price at a hypothetical circulating supply
pub fn price_at_supply(supply: u64, pool: Option<&PoolState>) -> Decimal {
    quote_price_at_supply(supply, pool).value
}

/// Tokens out for `sol_in` SOL
pub fn buy_return(sol_in: Decimal, pool: Option<&PoolState>) -> Decimal {
    quote_buy(sol_in, pool).value
}

/// SOL out for `tokens_in` tokens
pub fn sell_return(tokens_in: Decimal, pool: Option<&PoolState>) -> Decimal {
    quote_sell(tokens_in, pool).value
}

/// Slippage percentage for a trade of `amount`
pub fn slippage(amount: Decimal, side: TradeSide, pool: Option<&PoolState>) -> Decimal {
    quote_slippage(amount, side, pool).value
}

/// `circulating_supply × price`, saturating at `Decimal::MAX`
pub fn market_cap(circulating_supply: u64, price: Decimal) -> Decimal {
    Decimal::from(circulating_supply)
        .checked_mul(price)
        .unwrap_or(Decimal::MAX)
}
