//! Pool State Model
//!
//! Snapshot shape and invariants ([`state`]), the ledger's integer curve math
//! ([`ledger_math`]), the initialize → trade → close state machine
//! ([`lifecycle`]), snapshot sources ([`source`]) and an in-memory ledger
//! ([`ledger`]).

pub mod ledger;
pub mod ledger_math;
pub mod lifecycle;
pub mod source;
pub mod state;
