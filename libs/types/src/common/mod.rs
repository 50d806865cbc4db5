//! Shared building blocks: typed keys, error types and currency units

pub mod errors;
pub mod identifiers;
pub mod units;
