//! Error types for snapshot validation and ledger operations
//!
//! Snapshot errors describe *why* a pool record cannot be trusted by the
//! pricing engine. Ledger errors describe why a lifecycle operation was
//! refused. Neither is ever surfaced from a price quote: quoting callers
//! collapse both into the bootstrap fallback.

use crate::common::identifiers::{AccountKey, PoolId};
use crate::pool::lifecycle::{LifecycleEvent, PoolPhase};
use thiserror::Error;

/// Invariant violations detected while validating a raw pool record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Remaining supply larger than the pool ever minted
    #[error("supply remaining {remaining} exceeds total supply {total}")]
    SupplyExceedsTotal { remaining: u64, total: u64 },

    /// Virtual SOL reserve must stay strictly positive while the pool is active
    #[error("virtual SOL reserve is zero")]
    ZeroSolReserve,

    /// Virtual token reserve must stay strictly positive while the pool is active
    #[error("virtual token reserve is zero")]
    ZeroTokenReserve,
}

/// Failures raised by a ledger (real or in-memory) or by a snapshot source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No active pool is stored under this id
    #[error("pool {0} not found")]
    PoolNotFound(PoolId),

    /// Trade or initialization amount that the program rejects
    #[error("invalid amount")]
    InvalidAmount,

    /// Signer is not the pool owner
    #[error("signer {signer} is not the owner of pool {pool}")]
    Unauthorized { pool: PoolId, signer: AccountKey },

    /// Event not allowed in the current lifecycle phase
    #[error("cannot apply {event:?} to a pool in phase {phase:?}")]
    InvalidTransition {
        phase: PoolPhase,
        event: LifecycleEvent,
    },

    /// Checked integer arithmetic failed; the program would abort
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// The backing store could not be read (I/O, parse, transport)
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}
