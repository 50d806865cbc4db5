//! # Bonding-Curve Pool Types
//!
//! Pool State Model for bonding-curve token-sale pools: the validated reserve
//! snapshot the pricing engine reads, and the lifecycle that produces it.
//!
//! ## Design Philosophy
//!
//! - **Validated Boundary**: raw ledger records become [`PoolState`] only after
//!   the pool invariants are checked; the engine never sees a zero reserve
//! - **Integer Ledger Math**: anything the ledger will execute is computed in
//!   `u128` with the program's flooring, see [`pool::ledger_math`]
//! - **Explicit Addressing**: every operation takes a [`PoolId`]; there is no
//!   ambient "current pool"
//! - **Diagnosable Fallback**: [`SnapshotOutcome`] separates absent, corrupt and
//!   unavailable pools even though quoting treats them identically
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{load_snapshot, AccountKey, InMemoryLedger, PoolId};
//!
//! let owner = AccountKey::new([1u8; 32]);
//! let pool = PoolId::new([2u8; 32]);
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.initialize(pool, owner, 1_000_000, 1_000_000_000, 100_000).unwrap();
//! ledger.buy(&pool, &owner, 500_000_000).unwrap();
//!
//! let snapshot = load_snapshot(&ledger, &pool).into_option().unwrap();
//! assert_eq!(snapshot.circulating_supply(), 33_333);
//! ```

#[cfg(feature = "common")]
pub mod common;

#[cfg(feature = "common")]
pub mod pool;

#[cfg(feature = "common")]
pub use common::errors::{LedgerError, SnapshotError};
#[cfg(feature = "common")]
pub use common::identifiers::{AccountKey, KeyParseError, PoolId};
#[cfg(feature = "common")]
pub use common::units::{lamports_to_sol, sol_to_lamports, LAMPORTS_PER_SOL};
#[cfg(feature = "common")]
pub use pool::ledger::InMemoryLedger;
#[cfg(feature = "common")]
pub use pool::lifecycle::{can_close, CloseEligibility, LifecycleEvent, PoolPhase, TradeReceipt};
#[cfg(feature = "common")]
pub use pool::source::{load_snapshot, PoolSource, SnapshotOutcome};
#[cfg(feature = "common")]
pub use pool::state::{PoolState, RawPoolAccount};
