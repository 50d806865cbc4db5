//! Curve quoter - bonding-curve quotes from the command line
//!
//! Usage:
//!   curve-quoter price
//!   curve-quoter --pool pools.json buy 0.5
//!   curve-quoter --pool pools.json --json slippage 1000 --side sell
//!   curve-quoter curve --points 20
//!   curve-quoter simulate
//!
//! Without `--pool` every figure comes from the bootstrap curve and is marked
//! indicative.

mod commands;
mod json_source;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use commands::RenderText;
use curve_amm::TradeSide;
use curve_config::CurveConfig;
use json_source::JsonPoolSource;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use types::{load_snapshot, PoolId, PoolState, SnapshotOutcome};

#[derive(Parser, Debug)]
#[command(name = "curve-quoter")]
#[command(about = "Bonding-curve price, trade and chart quotes")]
#[command(version)]
struct Args {
    /// Pool snapshot file (JSON)
    #[arg(short, long, global = true)]
    pool: Option<PathBuf>,

    /// Pool to quote when the snapshot file holds several
    #[arg(long, global = true)]
    pool_id: Option<PoolId>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error, or a directive)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print reports and logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current marginal price
    Price {
        /// Price at this hypothetical circulating supply instead
        #[arg(long)]
        supply: Option<u64>,
    },
    /// Tokens received for an amount of SOL
    Buy { sol: Decimal },
    /// SOL received for an amount of tokens
    Sell { tokens: Decimal },
    /// Slippage of a trade against the marginal price
    Slippage {
        amount: Decimal,
        #[arg(long, value_enum, default_value_t = Side::Buy)]
        side: Side,
    },
    /// Sampled price curve for charting
    Curve {
        /// Number of segments; the chart has one more point
        #[arg(long)]
        points: Option<u32>,
    },
    /// Summary figures for the pool
    Stats,
    /// Replay a buy and sell on an in-memory pool and compare quotes
    Simulate {
        /// SOL spent on the simulated buy
        #[arg(long, default_value = "0.5")]
        sol: Decimal,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Buy,
    Sell,
}

impl From<Side> for TradeSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => TradeSide::Buy,
            Side::Sell => TradeSide::Sell,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = CurveConfig::load(args.config.as_deref())?;
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.as_str().to_string());
    init_logging(&log_level, args.json)?;

    debug!(cluster = %config.network.cluster, program_id = %config.network.program_id, "Quoter starting");

    let snapshot = resolve_snapshot(&args)?;
    let pool = snapshot.as_ref();
    let default_supply = config.pool_defaults.total_supply;

    match args.command {
        Command::Price { supply } => emit(&commands::price(pool, supply), args.json),
        Command::Buy { sol } => emit(&commands::buy(pool, sol), args.json),
        Command::Sell { tokens } => emit(&commands::sell(pool, tokens), args.json),
        Command::Slippage { amount, side } => {
            emit(&commands::slippage(pool, amount, side.into()), args.json)
        }
        Command::Curve { points } => {
            let points = points.unwrap_or(config.chart.points);
            emit(&commands::curve(pool, default_supply, points), args.json)
        }
        Command::Stats => emit(&commands::stats(pool, default_supply), args.json),
        Command::Simulate { sol } => {
            let report = commands::simulate(&config.pool_defaults, sol).map_err(|e| {
                error!("Simulation failed: {}", e);
                e
            })?;
            emit(&report, args.json)
        }
    }
}

fn log_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter '{}'", directive))
}

fn init_logging(directive: &str, json_logs: bool) -> Result<()> {
    let filter = log_filter(directive)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Snapshot for the selected pool, `None` when there is nothing to price from
fn resolve_snapshot(args: &Args) -> Result<Option<PoolState>> {
    let Some(path) = &args.pool else {
        debug!("No pool file given, quoting from the bootstrap curve");
        return Ok(None);
    };
    let source = JsonPoolSource::new(path);

    let id = match args.pool_id {
        Some(id) => id,
        None => match source.pool_ids() {
            Ok(ids) => match ids.as_slice() {
                [] => {
                    warn!(path = %source.path().display(), "Pool file is empty");
                    return Ok(None);
                }
                [id] => *id,
                _ => bail!("{} holds {} pools, select one with --pool-id", path.display(), ids.len()),
            },
            Err(e) => {
                warn!(error = %e, "Pool file unavailable, quoting from the bootstrap curve");
                return Ok(None);
            }
        },
    };

    let outcome = load_snapshot(&source, &id);
    if let SnapshotOutcome::Active(pool) = &outcome {
        info!(pool = %id, supply_remaining = pool.supply_remaining(), "Loaded pool snapshot");
    }
    Ok(outcome.into_option())
}

fn emit<R: Serialize + RenderText>(report: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_accepts_levels_and_directives() {
        assert!(log_filter("info").is_ok());
        assert!(log_filter("warn,curve_amm=debug").is_ok());
    }

    #[test]
    fn test_log_filter_rejects_unknown_level() {
        let err = log_filter("curve_amm=loud").unwrap_err();
        assert!(err.to_string().contains("curve_amm=loud"));
    }
}
