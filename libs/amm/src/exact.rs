//! Ledger-consistent integer quotes
//!
//! Amounts that will be submitted as instructions are computed with the
//! ledger's own integer arithmetic. Rounding direction:
//!
//! - outputs (tokens out, lamports out) round **down**, exactly as the ledger does
//! - required inputs round **up**, so the ledger delivers at least what was asked
//!
//! These require a real snapshot; there is no bootstrap equivalent.

use types::pool::ledger_math::{sol_out_for_tokens, tokens_out_for_sol};
use types::PoolState;

/// Tokens the ledger would hand out for `sol_in` lamports, capped at the
/// remaining supply
pub fn exact_tokens_out(sol_in: u64, pool: &PoolState) -> Option<u64> {
    tokens_out_for_sol(sol_in, pool.virtual_sol_reserve(), pool.virtual_token_reserve())
        .map(|tokens| tokens.min(pool.supply_remaining()))
}

/// Lamports the ledger would pay for `tokens_in` tokens
pub fn exact_sol_out(tokens_in: u64, pool: &PoolState) -> Option<u64> {
    sol_out_for_tokens(tokens_in, pool.virtual_sol_reserve(), pool.virtual_token_reserve())
}

/// Smallest lamport input whose buy yields at least `tokens_out` tokens
///
/// `ceil(tokens_out × sol_reserve / (token_reserve − tokens_out))`. `None` when
/// the curve cannot deliver that many tokens: at or beyond the virtual token
/// reserve, beyond the remaining supply, or when the reserve update would
/// overflow.
pub fn sol_in_for_tokens(tokens_out: u64, pool: &PoolState) -> Option<u64> {
    if tokens_out == 0 {
        return Some(0);
    }
    if tokens_out > pool.supply_remaining() || tokens_out >= pool.virtual_token_reserve() {
        return None;
    }

    let sol_reserve = pool.virtual_sol_reserve() as u128;
    let headroom = (pool.virtual_token_reserve() - tokens_out) as u128;
    let numerator = (tokens_out as u128).checked_mul(sol_reserve)?;
    let sol_in = u64::try_from(numerator.div_ceil(headroom)).ok()?;

    // The ledger adds the input to its SOL reserve with a checked add
    pool.virtual_sol_reserve().checked_add(sol_in)?;

    debug_assert!(exact_tokens_out(sol_in, pool).is_some_and(|t| t >= tokens_out));
    Some(sol_in)
}
