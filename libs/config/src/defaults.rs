//! Configuration defaults
//!
//! Values used when neither the config file nor the environment sets a key.

/// Cluster connection defaults
pub mod network {
    /// Cluster name
    pub const CLUSTER: &str = "devnet";

    /// JSON-RPC endpoint
    pub const RPC_URL: &str = "https://api.devnet.solana.com";

    /// Deployed bonding-curve program
    pub const PROGRAM_ID: &str = "AGjZLmcGfE3GSgowT8bKCkJ49ipG5qinKk59ahJ61bk9";

    /// Commitment level for account reads
    pub const COMMITMENT: &str = "confirmed";
}

/// Parameters proposed when creating a new pool
pub mod pool {
    /// Total token supply (1M tokens)
    pub const TOTAL_SUPPLY: u64 = 1_000_000;

    /// Initial virtual SOL reserve, in lamports (1 SOL)
    pub const VIRTUAL_SOL_RESERVE: u64 = 1_000_000_000;

    /// Initial virtual token reserve (100K tokens)
    pub const VIRTUAL_TOKEN_RESERVE: u64 = 100_000;
}

/// Chart rendering defaults
pub mod chart {
    /// Segments between sampled points; a chart has `POINTS + 1` samples
    pub const POINTS: u32 = 100;
}

/// Default tracing filter
pub const LOG_LEVEL: &str = "info";

/// Prefix for environment overrides, e.g. `CURVE_NETWORK__RPC_URL`
pub const ENV_PREFIX: &str = "CURVE";
