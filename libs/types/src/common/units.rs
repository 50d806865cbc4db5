//! Currency unit conversion between lamports and whole SOL
//!
//! Ledger reserves are integers in lamports (1 SOL = 10^9 lamports). Advisory
//! math divides by [`LAMPORTS_PER_SOL`] in exactly one place: here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Subdivision factor of the native currency
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimal places carried by a lamport amount expressed in SOL
pub const SOL_DECIMALS: u32 = 9;

/// Convert a lamport amount to whole SOL, exactly
#[inline]
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(lamports as i128, SOL_DECIMALS)
}

/// Convert whole SOL to lamports, flooring sub-lamport dust
///
/// Returns `None` for negative amounts or amounts that do not fit in `u64`.
pub fn sol_to_lamports(sol: Decimal) -> Option<u64> {
    if sol.is_sign_negative() {
        return None;
    }
    sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))?
        .floor()
        .to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lamports_to_sol_exact() {
        assert_eq!(lamports_to_sol(1_000_000_000), dec!(1));
        assert_eq!(lamports_to_sol(1), dec!(0.000000001));
        assert_eq!(lamports_to_sol(0), dec!(0));
        assert_eq!(lamports_to_sol(u64::MAX), dec!(18446744073.709551615));
    }

    #[test]
    fn test_sol_to_lamports_floors() {
        assert_eq!(sol_to_lamports(dec!(0.5)), Some(500_000_000));
        assert_eq!(sol_to_lamports(dec!(0.0000000019)), Some(1));
        assert_eq!(sol_to_lamports(dec!(-1)), None);
        assert_eq!(sol_to_lamports(dec!(100000000000)), None);
    }
}
