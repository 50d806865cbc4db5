//! Summary figures for a pool panel
//!
//! Everything a dashboard header shows about one pool, derived from a single
//! snapshot so the figures are mutually consistent.

use crate::fallback::BootstrapCurve;
use crate::pricing::{market_cap, quote_price, QuoteSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use types::PoolState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub total_supply: u64,
    pub circulating_supply: u64,
    pub supply_remaining: u64,
    pub price: Decimal,
    pub market_cap: Decimal,
    /// Share of the total supply already sold, in percent
    pub sold_pct: Decimal,
    /// Change of the current price against the bootstrap price one token
    /// earlier on the curve, in percent
    pub price_change_pct: Decimal,
    pub source: QuoteSource,
}

impl PoolStats {
    /// Stats for `pool`, or a fresh unsold pool of `default_total_supply`
    /// when there is no snapshot
    pub fn from_snapshot(pool: Option<&PoolState>, default_total_supply: u64) -> Self {
        let (total_supply, circulating_supply) = match pool {
            Some(pool) => (pool.total_supply(), pool.circulating_supply()),
            None => (default_total_supply, 0),
        };
        let supply_remaining = total_supply - circulating_supply;

        let quote = quote_price(pool);
        let price = quote.value;

        let sold_pct = if total_supply == 0 {
            dec!(0)
        } else {
            Decimal::from(circulating_supply) / Decimal::from(total_supply) * dec!(100)
        };

        Self {
            total_supply,
            circulating_supply,
            supply_remaining,
            price,
            market_cap: market_cap(circulating_supply, price),
            sold_pct,
            price_change_pct: price_change_pct(price, circulating_supply),
            source: quote.source,
        }
    }
}

fn price_change_pct(current: Decimal, circulating_supply: u64) -> Decimal {
    if current <= dec!(0) {
        return dec!(0);
    }
    let previous = BootstrapCurve::price_at_supply(circulating_supply.saturating_sub(1));
    if previous <= dec!(0) {
        return dec!(0);
    }
    (current - previous)
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(dec!(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::AccountKey;

    #[test]
    fn test_absent_pool_uses_defaults() {
        let stats = PoolStats::from_snapshot(None, 1_000_000);
        assert_eq!(stats.total_supply, 1_000_000);
        assert_eq!(stats.circulating_supply, 0);
        assert_eq!(stats.supply_remaining, 1_000_000);
        assert_eq!(stats.price, dec!(0.000001));
        assert_eq!(stats.market_cap, dec!(0));
        assert_eq!(stats.sold_pct, dec!(0));
        assert_eq!(stats.price_change_pct, dec!(0));
        assert!(matches!(stats.source, QuoteSource::Fallback(_)));
    }

    #[test]
    fn test_pool_backed_stats() {
        let pool = PoolState::new(AccountKey::default(), 1_000_000, 750_000, 1_000_000_000, 100_000).unwrap();
        let stats = PoolStats::from_snapshot(Some(&pool), 42);
        assert_eq!(stats.total_supply, 1_000_000);
        assert_eq!(stats.circulating_supply, 250_000);
        assert_eq!(stats.sold_pct, dec!(25));
        assert_eq!(stats.market_cap, Decimal::from(250_000u64) * stats.price);
        assert_eq!(stats.source, QuoteSource::Pool);
    }

    #[test]
    fn test_zero_total_supply() {
        let stats = PoolStats::from_snapshot(None, 0);
        assert_eq!(stats.sold_pct, dec!(0));
    }
}
