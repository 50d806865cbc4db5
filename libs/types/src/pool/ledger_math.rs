//! Integer curve math with the ledger program's exact semantics
//!
//! Both directions multiply in `u128` and floor the division, matching the
//! on-chain program bit for bit. Anything that may be submitted back to the
//! ledger is computed here, never from the advisory `Decimal` math.

/// Tokens the ledger hands out for `sol_in` lamports
///
/// `floor(sol_in * virtual_token_reserve / (virtual_sol_reserve + sol_in))`.
/// `None` when the denominator is zero or the result does not fit in `u64`.
pub fn tokens_out_for_sol(sol_in: u64, virtual_sol_reserve: u64, virtual_token_reserve: u64) -> Option<u64> {
    let numerator = (sol_in as u128).checked_mul(virtual_token_reserve as u128)?;
    let denominator = (virtual_sol_reserve as u128).checked_add(sol_in as u128)?;
    if denominator == 0 {
        return None;
    }
    u64::try_from(numerator / denominator).ok()
}

/// Lamports the ledger pays out for `tokens_in` tokens
///
/// `floor(tokens_in * virtual_sol_reserve / (virtual_token_reserve + tokens_in))`.
pub fn sol_out_for_tokens(tokens_in: u64, virtual_sol_reserve: u64, virtual_token_reserve: u64) -> Option<u64> {
    let numerator = (tokens_in as u128).checked_mul(virtual_sol_reserve as u128)?;
    let denominator = (virtual_token_reserve as u128).checked_add(tokens_in as u128)?;
    if denominator == 0 {
        return None;
    }
    u64::try_from(numerator / denominator).ok()
}
