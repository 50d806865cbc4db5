//! Bonding-Curve Pricing Property Tests
//!
//! Properties that must hold for every valid snapshot, and for the bootstrap
//! curve, regardless of the specific reserves.

use curve_amm::{
    buy_return, exact_tokens_out, price, price_at_supply, sample_curve, sell_return, BootstrapCurve,
    MIN_PRICE,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use types::{lamports_to_sol, AccountKey, PoolState};

prop_compose! {
    fn arb_pool()(
        total_supply in 1u64..=1_000_000_000_000,
        sold_permille in 0u64..=1_000,
        virtual_sol in 1u64..=1_000_000_000_000_000,
        virtual_tokens in 1u64..=1_000_000_000_000_000,
    ) -> PoolState {
        let sold = (total_supply as u128 * sold_permille as u128 / 1_000) as u64;
        PoolState::new(AccountKey::default(), total_supply, total_supply - sold, virtual_sol, virtual_tokens)
            .expect("generated snapshot is valid")
    }
}

prop_compose! {
    fn arb_lamports()(lamports in 1u64..=1_000_000_000_000_000) -> u64 {
        lamports
    }
}

prop_compose! {
    fn arb_tokens()(tokens in 1u64..=1_000_000_000_000) -> Decimal {
        Decimal::from(tokens)
    }
}

/// Any positive `Decimal`, from the smallest scale up to `Decimal::MAX`
fn arb_positive_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::MAX),
        9 => (1i128..(1i128 << 96), 0u32..=28)
            .prop_map(|(mantissa, scale)| Decimal::from_i128_with_scale(mantissa, scale)),
    ]
}

proptest! {
    #[test]
    fn buy_return_is_monotonic_and_capped(
        pool in arb_pool(),
        a in arb_lamports(),
        b in arb_lamports(),
    ) {
        let (small, large) = (a.min(b), a.max(b));
        let out_small = buy_return(lamports_to_sol(small), Some(&pool));
        let out_large = buy_return(lamports_to_sol(large), Some(&pool));

        prop_assert!(out_small <= out_large,
            "buying more must not yield fewer tokens: {} > {}", out_small, out_large);
        prop_assert!(out_large <= Decimal::from(pool.supply_remaining()),
            "buy return {} exceeds remaining supply {}", out_large, pool.supply_remaining());
    }

    #[test]
    fn sell_return_is_monotonic(
        pool in arb_pool(),
        a in arb_tokens(),
        b in arb_tokens(),
    ) {
        let (small, large) = (a.min(b), a.max(b));
        prop_assert!(sell_return(small, Some(&pool)) <= sell_return(large, Some(&pool)));
    }

    #[test]
    fn pool_quotes_respect_limits_over_full_decimal_range(
        pool in arb_pool(),
        a in arb_positive_decimal(),
        b in arb_positive_decimal(),
    ) {
        let (small, large) = (a.min(b), a.max(b));

        let bought_small = buy_return(small, Some(&pool));
        let bought_large = buy_return(large, Some(&pool));
        prop_assert!(bought_small <= bought_large,
            "buy return not monotonic: {} for {} > {} for {}", bought_small, small, bought_large, large);
        prop_assert!(bought_large <= Decimal::from(pool.supply_remaining()),
            "buy return {} exceeds remaining supply {}", bought_large, pool.supply_remaining());

        let sold_small = sell_return(small, Some(&pool));
        let sold_large = sell_return(large, Some(&pool));
        prop_assert!(sold_small <= sold_large,
            "sell return not monotonic: {} for {} > {} for {}", sold_small, small, sold_large, large);
        prop_assert!(sold_large <= pool.virtual_sol_reserve_sol(),
            "sell return {} exceeds SOL reserve {}", sold_large, pool.virtual_sol_reserve_sol());
    }

    #[test]
    fn round_trip_never_profits(pool in arb_pool(), lamports in arb_lamports()) {
        let sol_in = lamports_to_sol(lamports);
        let tokens = buy_return(sol_in, Some(&pool));
        let back = sell_return(tokens, Some(&pool));

        // One lamport of tolerance for decimal rounding
        prop_assert!(back <= sol_in + dec!(0.000000001),
            "round trip returned {} SOL for {} SOL paid", back, sol_in);
    }

    #[test]
    fn quotes_are_non_negative_and_price_is_floored(
        pool in arb_pool(),
        lamports in arb_lamports(),
        tokens in arb_tokens(),
        supply in any::<u64>(),
    ) {
        for snapshot in [Some(&pool), None] {
            prop_assert!(price(snapshot) >= MIN_PRICE);
            prop_assert!(price_at_supply(supply, snapshot) >= MIN_PRICE);
            prop_assert!(buy_return(lamports_to_sol(lamports), snapshot) >= Decimal::ZERO);
            prop_assert!(sell_return(tokens, snapshot) >= Decimal::ZERO);
        }
    }

    #[test]
    fn missing_pool_matches_bootstrap_curve(
        supply in any::<u64>(),
        lamports in arb_lamports(),
        tokens in arb_tokens(),
    ) {
        let sol_in = lamports_to_sol(lamports);
        prop_assert_eq!(price_at_supply(supply, None), BootstrapCurve::price_at_supply(supply));
        prop_assert_eq!(buy_return(sol_in, None), sol_in / dec!(0.01));
        prop_assert_eq!(sell_return(tokens, None), tokens * dec!(0.01));
    }

    #[test]
    fn exact_quote_is_floor_of_decimal_quote(pool in arb_pool(), lamports in arb_lamports()) {
        let advisory = buy_return(lamports_to_sol(lamports), Some(&pool));
        let exact = Decimal::from(exact_tokens_out(lamports, &pool).expect("no overflow in u128"));
        let epsilon = dec!(0.000001);

        prop_assert!(exact <= advisory + epsilon, "exact {} above advisory {}", exact, advisory);
        prop_assert!(advisory < exact + Decimal::ONE + epsilon, "exact {} too far below {}", exact, advisory);
    }

    #[test]
    fn curve_sampling_is_deterministic(
        total_supply in any::<u64>(),
        point_count in 0u32..=500,
        pool in proptest::option::of(arb_pool()),
    ) {
        let first: Vec<_> = sample_curve(total_supply, pool.as_ref(), point_count).collect();
        let second: Vec<_> = sample_curve(total_supply, pool.as_ref(), point_count).collect();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), point_count as usize + 1);
        prop_assert_eq!(first[0].supply, 0);
        prop_assert!(first.windows(2).all(|w| w[0].supply <= w[1].supply));
        if point_count > 0 {
            prop_assert_eq!(first[first.len() - 1].supply, total_supply);
        }
    }
}
