//! Snapshot sources and boundary classification
//!
//! A [`PoolSource`] is anything that can read a pool account: the real ledger
//! client, a JSON file, or [`InMemoryLedger`](crate::pool::ledger::InMemoryLedger).
//! [`load_snapshot`] turns whatever the source returns into a
//! [`SnapshotOutcome`], keeping "absent", "corrupt" and "unavailable" apart for
//! diagnostics while [`SnapshotOutcome::into_option`] collapses all three into
//! the single "no pool" case the pricing engine understands.

use crate::common::errors::{LedgerError, SnapshotError};
use crate::common::identifiers::PoolId;
use crate::pool::state::{PoolState, RawPoolAccount};
use tracing::{debug, warn};

/// Read access to pool accounts
pub trait PoolSource {
    /// Fetch the raw account, `Ok(None)` when no active pool exists at `id`
    fn fetch_pool(&self, id: &PoolId) -> Result<Option<RawPoolAccount>, LedgerError>;
}

impl<S: PoolSource + ?Sized> PoolSource for &S {
    fn fetch_pool(&self, id: &PoolId) -> Result<Option<RawPoolAccount>, LedgerError> {
        (**self).fetch_pool(id)
    }
}

/// Classified result of reading one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Valid snapshot of an active pool
    Active(PoolState),
    /// No pool at this id (never created, or closed)
    Absent,
    /// Account exists but violates the pool invariants
    Corrupt(SnapshotError),
    /// The source failed; treated as absent by quoting callers
    Unavailable(LedgerError),
}

impl SnapshotOutcome {
    /// Snapshot to price against, `None` means "use the fallback policy"
    pub fn into_option(self) -> Option<PoolState> {
        match self {
            SnapshotOutcome::Active(pool) => Some(pool),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<&PoolState> {
        match self {
            SnapshotOutcome::Active(pool) => Some(pool),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SnapshotOutcome::Active(_))
    }
}

/// Read and validate one pool snapshot
pub fn load_snapshot<S: PoolSource + ?Sized>(source: &S, id: &PoolId) -> SnapshotOutcome {
    match source.fetch_pool(id) {
        Ok(Some(raw)) => match PoolState::try_from(raw) {
            Ok(pool) => SnapshotOutcome::Active(pool),
            Err(err) => {
                warn!(pool = %id, error = %err, "Rejecting corrupt pool snapshot");
                SnapshotOutcome::Corrupt(err)
            }
        },
        Ok(None) => {
            debug!(pool = %id, "No pool account found");
            SnapshotOutcome::Absent
        }
        Err(err) => {
            warn!(pool = %id, error = %err, "Pool fetch failed, treating pool as absent");
            SnapshotOutcome::Unavailable(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::identifiers::AccountKey;

    struct FixedSource(Result<Option<RawPoolAccount>, LedgerError>);

    impl PoolSource for FixedSource {
        fn fetch_pool(&self, _id: &PoolId) -> Result<Option<RawPoolAccount>, LedgerError> {
            self.0.clone()
        }
    }

    fn raw(virtual_sol_reserve: u64) -> RawPoolAccount {
        RawPoolAccount {
            owner: AccountKey::new([3u8; 32]),
            total_supply: 1_000,
            supply_remaining: 1_000,
            virtual_sol_reserve,
            virtual_token_reserve: 500,
        }
    }

    #[test]
    fn test_active_snapshot() {
        let outcome = load_snapshot(&FixedSource(Ok(Some(raw(10)))), &PoolId::default());
        assert!(outcome.is_active());
        assert_eq!(outcome.into_option().unwrap().virtual_sol_reserve(), 10);
    }

    #[test]
    fn test_corrupt_collapses_to_none() {
        let outcome = load_snapshot(&FixedSource(Ok(Some(raw(0)))), &PoolId::default());
        assert_eq!(outcome, SnapshotOutcome::Corrupt(SnapshotError::ZeroSolReserve));
        assert!(outcome.into_option().is_none());
    }

    #[test]
    fn test_absent_and_unavailable_collapse_to_none() {
        let absent = load_snapshot(&FixedSource(Ok(None)), &PoolId::default());
        assert_eq!(absent, SnapshotOutcome::Absent);
        assert!(absent.as_option().is_none());

        let failed = load_snapshot(
            &FixedSource(Err(LedgerError::Unavailable("rpc timeout".into()))),
            &PoolId::default(),
        );
        assert!(matches!(failed, SnapshotOutcome::Unavailable(_)));
        assert!(failed.into_option().is_none());
    }
}
