//! In-memory ledger with the bonding-curve program's semantics
//!
//! Used by tests, the quoter's `simulate` command and anywhere a real ledger
//! is not reachable. Every rule matches the on-chain program:
//!
//! - initialize sets `supply_remaining = total_supply`
//! - buy and sell are owner-only and floor in `u128`
//! - a trade whose output floors to zero is rejected as an invalid amount
//! - reserve and supply updates are checked; an underflow aborts the trade
//!   without touching state
//! - close is owner-only and makes the pool unfetchable

use crate::common::errors::LedgerError;
use crate::common::identifiers::{AccountKey, PoolId};
use crate::pool::ledger_math::{sol_out_for_tokens, tokens_out_for_sol};
use crate::pool::lifecycle::{LifecycleEvent, PoolPhase, TradeReceipt};
use crate::pool::source::PoolSource;
use crate::pool::state::{PoolState, RawPoolAccount};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct PoolRecord {
    phase: PoolPhase,
    account: RawPoolAccount,
}

/// Ledger holding any number of pools in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    pools: HashMap<PoolId, PoolRecord>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle phase of `id`; unknown ids are uninitialized
    pub fn phase(&self, id: &PoolId) -> PoolPhase {
        self.pools
            .get(id)
            .map(|record| record.phase)
            .unwrap_or(PoolPhase::Uninitialized)
    }

    /// Create a pool owned by `owner`
    pub fn initialize(
        &mut self,
        id: PoolId,
        owner: AccountKey,
        total_supply: u64,
        virtual_sol_reserve: u64,
        virtual_token_reserve: u64,
    ) -> Result<TradeReceipt, LedgerError> {
        let next = self.phase(&id).transition(LifecycleEvent::Initialize)?;

        let account = RawPoolAccount {
            owner,
            total_supply,
            supply_remaining: total_supply,
            virtual_sol_reserve,
            virtual_token_reserve,
        };
        // Zero reserves would make every later trade divide by zero
        let state = PoolState::try_from(account).map_err(|_| LedgerError::InvalidAmount)?;

        self.pools.insert(id, PoolRecord { phase: next, account });
        info!(
            pool = %id,
            owner = %owner,
            total_supply,
            virtual_sol_reserve,
            virtual_token_reserve,
            "Pool initialized"
        );

        Ok(TradeReceipt {
            pool: id,
            event: LifecycleEvent::Initialize,
            amount_in: 0,
            amount_out: 0,
            post_state: Some(state),
        })
    }

    /// Spend `sol_in` lamports for tokens
    pub fn buy(&mut self, id: &PoolId, signer: &AccountKey, sol_in: u64) -> Result<TradeReceipt, LedgerError> {
        let record = self.active_record(id, signer, LifecycleEvent::Buy)?;
        let account = record.account;

        let tokens_out = tokens_out_for_sol(sol_in, account.virtual_sol_reserve, account.virtual_token_reserve)
            .ok_or(LedgerError::ArithmeticOverflow("buy output"))?;
        if tokens_out == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let updated = RawPoolAccount {
            virtual_sol_reserve: account
                .virtual_sol_reserve
                .checked_add(sol_in)
                .ok_or(LedgerError::ArithmeticOverflow("virtual SOL reserve"))?,
            virtual_token_reserve: account
                .virtual_token_reserve
                .checked_sub(tokens_out)
                .ok_or(LedgerError::ArithmeticOverflow("virtual token reserve"))?,
            supply_remaining: account
                .supply_remaining
                .checked_sub(tokens_out)
                .ok_or(LedgerError::ArithmeticOverflow("supply remaining"))?,
            ..account
        };

        debug!(pool = %id, sol_in, tokens_out, "Bought tokens");
        self.commit(id, updated, LifecycleEvent::Buy, sol_in, tokens_out)
    }

    /// Sell `tokens_in` tokens back for lamports
    pub fn sell(&mut self, id: &PoolId, signer: &AccountKey, tokens_in: u64) -> Result<TradeReceipt, LedgerError> {
        let record = self.active_record(id, signer, LifecycleEvent::Sell)?;
        let account = record.account;

        let sol_out = sol_out_for_tokens(tokens_in, account.virtual_sol_reserve, account.virtual_token_reserve)
            .ok_or(LedgerError::ArithmeticOverflow("sell output"))?;
        if sol_out == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let updated = RawPoolAccount {
            virtual_token_reserve: account
                .virtual_token_reserve
                .checked_add(tokens_in)
                .ok_or(LedgerError::ArithmeticOverflow("virtual token reserve"))?,
            virtual_sol_reserve: account
                .virtual_sol_reserve
                .checked_sub(sol_out)
                .ok_or(LedgerError::ArithmeticOverflow("virtual SOL reserve"))?,
            supply_remaining: account
                .supply_remaining
                .checked_add(tokens_in)
                .ok_or(LedgerError::ArithmeticOverflow("supply remaining"))?,
            ..account
        };

        debug!(pool = %id, tokens_in, sol_out, "Sold tokens");
        self.commit(id, updated, LifecycleEvent::Sell, tokens_in, sol_out)
    }

    /// Close the pool; only the owner may do this
    pub fn close(&mut self, id: &PoolId, signer: &AccountKey) -> Result<TradeReceipt, LedgerError> {
        self.active_record(id, signer, LifecycleEvent::Close)?;

        if let Some(record) = self.pools.get_mut(id) {
            record.phase = record.phase.transition(LifecycleEvent::Close)?;
        }
        info!(pool = %id, owner = %signer, "Pool closed");

        Ok(TradeReceipt {
            pool: *id,
            event: LifecycleEvent::Close,
            amount_in: 0,
            amount_out: 0,
            post_state: None,
        })
    }

    /// Active record that `signer` is allowed to operate on
    fn active_record(
        &self,
        id: &PoolId,
        signer: &AccountKey,
        event: LifecycleEvent,
    ) -> Result<&PoolRecord, LedgerError> {
        let record = self
            .pools
            .get(id)
            .filter(|record| record.phase.is_active())
            .ok_or(LedgerError::PoolNotFound(*id))?;
        record.phase.transition(event)?;

        if record.account.owner != *signer {
            return Err(LedgerError::Unauthorized {
                pool: *id,
                signer: *signer,
            });
        }
        Ok(record)
    }

    fn commit(
        &mut self,
        id: &PoolId,
        updated: RawPoolAccount,
        event: LifecycleEvent,
        amount_in: u64,
        amount_out: u64,
    ) -> Result<TradeReceipt, LedgerError> {
        // Program arithmetic can drain a reserve to zero; the account is still
        // written, but it no longer validates as a tradeable snapshot
        let post_state = PoolState::try_from(updated).ok();
        if let Some(record) = self.pools.get_mut(id) {
            record.account = updated;
        }

        Ok(TradeReceipt {
            pool: *id,
            event,
            amount_in,
            amount_out,
            post_state,
        })
    }
}

impl PoolSource for InMemoryLedger {
    fn fetch_pool(&self, id: &PoolId) -> Result<Option<RawPoolAccount>, LedgerError> {
        Ok(self
            .pools
            .get(id)
            .filter(|record| record.phase.is_active())
            .map(|record| record.account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: AccountKey = AccountKey::new([1u8; 32]);
    const STRANGER: AccountKey = AccountKey::new([2u8; 32]);
    const POOL: PoolId = PoolId::new([7u8; 32]);

    fn ledger_with_default_pool() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        ledger
            .initialize(POOL, OWNER, 1_000_000, 1_000_000_000, 100_000)
            .unwrap();
        ledger
    }

    #[test]
    fn test_initialize_sets_remaining_to_total() {
        let ledger = ledger_with_default_pool();
        let raw = ledger.fetch_pool(&POOL).unwrap().unwrap();
        assert_eq!(raw.supply_remaining, 1_000_000);
        assert_eq!(ledger.phase(&POOL), PoolPhase::Active);
    }

    #[test]
    fn test_initialize_rejects_zero_reserve() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.initialize(POOL, OWNER, 10, 0, 10),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(ledger.phase(&POOL), PoolPhase::Uninitialized);
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut ledger = ledger_with_default_pool();
        let err = ledger.initialize(POOL, OWNER, 1, 1, 1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransition { .. }));
    }

    #[test]
    fn test_buy_updates_reserves() {
        let mut ledger = ledger_with_default_pool();
        let receipt = ledger.buy(&POOL, &OWNER, 500_000_000).unwrap();
        assert_eq!(receipt.amount_out, 33_333);

        let state = receipt.post_state.unwrap();
        assert_eq!(state.virtual_sol_reserve(), 1_500_000_000);
        assert_eq!(state.virtual_token_reserve(), 100_000 - 33_333);
        assert_eq!(state.supply_remaining(), 1_000_000 - 33_333);
        assert_eq!(state.circulating_supply(), 33_333);
    }

    #[test]
    fn test_sell_after_buy() {
        let mut ledger = ledger_with_default_pool();
        ledger.buy(&POOL, &OWNER, 500_000_000).unwrap();
        let receipt = ledger.sell(&POOL, &OWNER, 33_333).unwrap();

        // Round trip never pays back more than was put in
        assert!(receipt.amount_out <= 500_000_000);
        let state = receipt.post_state.unwrap();
        assert_eq!(state.supply_remaining(), 1_000_000);
        assert_eq!(state.virtual_token_reserve(), 100_000);
    }

    #[test]
    fn test_dust_trades_rejected() {
        let mut ledger = ledger_with_default_pool();
        // 1 lamport buys floor(100_000 / 1_000_000_001) = 0 tokens
        assert_eq!(ledger.buy(&POOL, &OWNER, 1), Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.sell(&POOL, &OWNER, 0), Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn test_trades_are_owner_only() {
        let mut ledger = ledger_with_default_pool();
        assert_eq!(
            ledger.buy(&POOL, &STRANGER, 500_000_000),
            Err(LedgerError::Unauthorized {
                pool: POOL,
                signer: STRANGER
            })
        );
        assert!(ledger.sell(&POOL, &STRANGER, 10).is_err());
        assert!(ledger.close(&POOL, &STRANGER).is_err());
    }

    #[test]
    fn test_buy_exceeding_remaining_supply_aborts() {
        let mut ledger = InMemoryLedger::new();
        ledger.initialize(POOL, OWNER, 10, 1_000_000_000, 100_000).unwrap();

        let err = ledger.buy(&POOL, &OWNER, 1_000_000_000).unwrap_err();
        assert_eq!(err, LedgerError::ArithmeticOverflow("supply remaining"));
        // State untouched
        let raw = ledger.fetch_pool(&POOL).unwrap().unwrap();
        assert_eq!(raw.supply_remaining, 10);
        assert_eq!(raw.virtual_sol_reserve, 1_000_000_000);
    }

    #[test]
    fn test_close_hides_pool() {
        let mut ledger = ledger_with_default_pool();
        let receipt = ledger.close(&POOL, &OWNER).unwrap();
        assert!(receipt.post_state.is_none());
        assert_eq!(ledger.phase(&POOL), PoolPhase::Closed);
        assert_eq!(ledger.fetch_pool(&POOL).unwrap(), None);

        assert_eq!(
            ledger.buy(&POOL, &OWNER, 500_000_000),
            Err(LedgerError::PoolNotFound(POOL))
        );
        assert_eq!(ledger.close(&POOL, &OWNER), Err(LedgerError::PoolNotFound(POOL)));
    }

    #[test]
    fn test_unknown_pool() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.fetch_pool(&POOL).unwrap(), None);
        assert_eq!(
            ledger.sell(&POOL, &OWNER, 1),
            Err(LedgerError::PoolNotFound(POOL))
        );
    }
}
