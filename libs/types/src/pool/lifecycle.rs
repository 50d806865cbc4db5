//! Pool lifecycle state machine
//!
//! ```text
//!  Uninitialized --Initialize--> Active --Close--> Closed
//!                                  |  ^
//!                                  +--+ Buy / Sell
//! ```
//!
//! Every other (phase, event) pair is rejected. A closed pool yields no
//! snapshot, so quoting against it falls back to the bootstrap policy.

use crate::common::errors::LedgerError;
use crate::common::identifiers::{AccountKey, PoolId};
use crate::pool::state::PoolState;
use serde::{Deserialize, Serialize};

/// Where a pool sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolPhase {
    Uninitialized,
    Active,
    Closed,
}

/// Operations that move a pool through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Initialize,
    Buy,
    Sell,
    Close,
}

impl PoolPhase {
    /// Next phase after `event`, or the rejected transition
    pub fn transition(self, event: LifecycleEvent) -> Result<PoolPhase, LedgerError> {
        match (self, event) {
            (PoolPhase::Uninitialized, LifecycleEvent::Initialize) => Ok(PoolPhase::Active),
            (PoolPhase::Active, LifecycleEvent::Buy | LifecycleEvent::Sell) => Ok(PoolPhase::Active),
            (PoolPhase::Active, LifecycleEvent::Close) => Ok(PoolPhase::Closed),
            (phase, event) => Err(LedgerError::InvalidTransition { phase, event }),
        }
    }

    /// Only active pools can be snapshotted and traded
    pub fn is_active(self) -> bool {
        matches!(self, PoolPhase::Active)
    }
}

/// Result of one applied lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeReceipt {
    pub pool: PoolId,
    pub event: LifecycleEvent,
    /// Lamports for buys, tokens for sells, zero otherwise
    pub amount_in: u64,
    /// Tokens for buys, lamports for sells, zero otherwise
    pub amount_out: u64,
    /// Pool state after the operation; `None` once closed
    pub post_state: Option<PoolState>,
}

/// Whether a signer may close a pool, and why not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseEligibility {
    pub can_close: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Close permission for `signer` against an optional snapshot
pub fn can_close(pool: Option<&PoolState>, signer: &AccountKey) -> CloseEligibility {
    match pool {
        None => CloseEligibility {
            can_close: false,
            reason: Some("pool not initialized".to_string()),
        },
        Some(pool) if pool.is_owner(signer) => CloseEligibility {
            can_close: true,
            reason: None,
        },
        Some(_) => CloseEligibility {
            can_close: false,
            reason: Some("not pool owner".to_string()),
        },
    }
}
