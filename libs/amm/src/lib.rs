//! # Curve AMM Library - Bonding-Curve Pricing Engine
//!
//! ## Purpose
//!
//! Advisory pricing for a virtual-reserve bonding-curve token pool: spot price,
//! buy and sell returns, slippage, chart samples, and panel statistics. Every
//! quote function accepts an optional pool snapshot and stays total: without a
//! snapshot it answers from the linear bootstrap curve and marks the result as
//! indicative.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Validated [`PoolState`] snapshots from `types::load_snapshot`
//! - **Output Destinations**: Trading UI, the `curve-quoter` CLI, instruction builders
//! - **Precision**: Decimal arithmetic for display figures, u128 integer math
//!   in [`exact`] for amounts submitted to the ledger
//!
//! ## Module Map
//!
//! - [`curve_math`]: checked virtual-reserve formulas
//! - [`fallback`]: bootstrap curve used when no snapshot is available
//! - [`pool_traits`]: [`CurvePool`] view over a snapshot
//! - [`pricing`]: the total quote functions and their [`Quote`] provenance
//! - [`exact`]: ledger-consistent integer quotes
//! - [`curve_sampler`]: lazy chart sampling
//! - [`pool_stats`]: summary figures for one pool
//!
//! ## Example
//!
//! ```rust
//! use curve_amm::{buy_return, price, dec};
//!
//! // No pool yet: bootstrap curve
//! assert_eq!(price(None), dec!(0.000001));
//! assert_eq!(buy_return(dec!(2), None), dec!(200));
//! ```

pub mod curve_math;
pub mod curve_sampler;
pub mod exact;
pub mod fallback;
pub mod pool_stats;
pub mod pool_traits;
pub mod pricing;

pub use curve_math::{CurveError, CurveMath};
pub use curve_sampler::{sample_curve, CurvePoint, CurveSamples};
pub use exact::{exact_sol_out, exact_tokens_out, sol_in_for_tokens};
pub use fallback::{BootstrapCurve, LINEAR_PRICE_PER_TOKEN, MIN_PRICE};
pub use pool_stats::PoolStats;
pub use pool_traits::CurvePool;
pub use pricing::{
    buy_return, market_cap, price, price_at_supply, quote_buy, quote_price, quote_price_at_supply,
    quote_sell, quote_slippage, sell_return, slippage, FallbackReason, Quote, QuoteSource,
    TradeSide,
};

pub use types::PoolState;

/// Common types for curve calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
