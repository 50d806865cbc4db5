//! # Curve Quoter Configuration
//!
//! Settings and defaults for the bonding-curve quoter: cluster endpoint,
//! proposed pool parameters, chart resolution and log level.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curve_config::CurveConfig;
//!
//! // Defaults, then CURVE_* environment overrides
//! let config = CurveConfig::load(None)?;
//! println!("{} points", config.chart.points);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod settings;

// Re-export commonly used types
pub use settings::{ChartConfig, CurveConfig, LogLevel, NetworkConfig, PoolDefaults};
