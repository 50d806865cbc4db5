//! Quoter subcommands
//!
//! Each command builds a serializable report; `main` prints it as JSON or as
//! the report's text rendering.

use anyhow::{Context, Result};
use curve_amm::{
    buy_return, exact_sol_out, exact_tokens_out, quote_buy, quote_price, quote_price_at_supply,
    quote_sell, quote_slippage, sample_curve, sell_return, CurvePoint, FallbackReason, PoolStats,
    Quote, QuoteSource, TradeSide,
};
use curve_config::PoolDefaults;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use types::{
    can_close, load_snapshot, sol_to_lamports, AccountKey, CloseEligibility, InMemoryLedger,
    LifecycleEvent, PoolId, PoolState,
};

/// Plain-text rendering of a report
pub trait RenderText {
    fn render_text(&self) -> String;
}

fn describe(source: &QuoteSource) -> String {
    match source {
        QuoteSource::Pool => "pool".to_string(),
        QuoteSource::Fallback(FallbackReason::NoPool) => "indicative, no pool".to_string(),
        QuoteSource::Fallback(FallbackReason::Computation(detail)) => format!("indicative, {}", detail),
    }
}

#[derive(Debug, Serialize)]
pub struct PriceReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(flatten)]
    pub quote: Quote,
}

impl RenderText for PriceReport {
    fn render_text(&self) -> String {
        match self.supply {
            Some(supply) => format!(
                "price at supply {}: {} SOL/token ({})",
                supply,
                self.quote.value,
                describe(&self.quote.source)
            ),
            None => format!("price: {} SOL/token ({})", self.quote.value, describe(&self.quote.source)),
        }
    }
}

pub fn price(pool: Option<&PoolState>, supply: Option<u64>) -> PriceReport {
    let quote = match supply {
        Some(supply) => quote_price_at_supply(supply, pool),
        None => quote_price(pool),
    };
    PriceReport { supply, quote }
}

#[derive(Debug, Serialize)]
pub struct TradeReport {
    pub side: TradeSide,
    pub amount_in: Decimal,
    /// Advisory output: tokens for a buy, SOL for a sell
    pub amount_out: Quote,
    /// Ledger-exact output: tokens for a buy, lamports for a sell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_out: Option<u64>,
    pub slippage_pct: Decimal,
}

impl RenderText for TradeReport {
    fn render_text(&self) -> String {
        let (unit_in, unit_out, exact_unit) = match self.side {
            TradeSide::Buy => ("SOL", "tokens", "tokens"),
            TradeSide::Sell => ("tokens", "SOL", "lamports"),
        };
        let mut text = format!(
            "{} {} -> {} {} ({})\nslippage: {}%",
            self.amount_in,
            unit_in,
            self.amount_out.value,
            unit_out,
            describe(&self.amount_out.source),
            self.slippage_pct.round_dp(4),
        );
        if let Some(exact) = self.exact_out {
            text.push_str(&format!("\nledger-exact: {} {}", exact, exact_unit));
        }
        text
    }
}

pub fn buy(pool: Option<&PoolState>, sol_in: Decimal) -> TradeReport {
    let exact_out = pool.zip(sol_to_lamports(sol_in)).and_then(|(pool, lamports)| exact_tokens_out(lamports, pool));
    TradeReport {
        side: TradeSide::Buy,
        amount_in: sol_in,
        amount_out: quote_buy(sol_in, pool),
        exact_out,
        slippage_pct: quote_slippage(sol_in, TradeSide::Buy, pool).value,
    }
}

pub fn sell(pool: Option<&PoolState>, tokens_in: Decimal) -> TradeReport {
    // Only whole token amounts can be submitted
    let whole_tokens = tokens_in.fract().is_zero().then(|| tokens_in.to_u64()).flatten();
    let exact_out = pool.zip(whole_tokens).and_then(|(pool, tokens)| exact_sol_out(tokens, pool));
    TradeReport {
        side: TradeSide::Sell,
        amount_in: tokens_in,
        amount_out: quote_sell(tokens_in, pool),
        exact_out,
        slippage_pct: quote_slippage(tokens_in, TradeSide::Sell, pool).value,
    }
}

#[derive(Debug, Serialize)]
pub struct SlippageReport {
    pub side: TradeSide,
    pub amount: Decimal,
    #[serde(flatten)]
    pub quote: Quote,
}

impl RenderText for SlippageReport {
    fn render_text(&self) -> String {
        format!(
            "slippage ({:?}, {}): {}% ({})",
            self.side,
            self.amount,
            self.quote.value.round_dp(4),
            describe(&self.quote.source)
        )
    }
}

pub fn slippage(pool: Option<&PoolState>, amount: Decimal, side: TradeSide) -> SlippageReport {
    SlippageReport {
        side,
        amount,
        quote: quote_slippage(amount, side, pool),
    }
}

#[derive(Debug, Serialize)]
pub struct CurveReport {
    pub total_supply: u64,
    pub indicative: bool,
    pub points: Vec<CurvePoint>,
}

impl RenderText for CurveReport {
    fn render_text(&self) -> String {
        let mut text = format!("{:>20}  {}", "supply", "price");
        for point in &self.points {
            text.push_str(&format!("\n{:>20}  {}", point.supply, point.price));
        }
        if self.indicative {
            text.push_str("\n(indicative, no pool)");
        }
        text
    }
}

pub fn curve(pool: Option<&PoolState>, default_total_supply: u64, points: u32) -> CurveReport {
    let total_supply = pool.map_or(default_total_supply, PoolState::total_supply);
    CurveReport {
        total_supply,
        indicative: pool.is_none(),
        points: sample_curve(total_supply, pool, points).collect(),
    }
}

impl RenderText for PoolStats {
    fn render_text(&self) -> String {
        format!(
            "price:          {} SOL/token ({})\n\
             market cap:     {} SOL\n\
             circulating:    {} / {} ({}% sold)\n\
             remaining:      {}\n\
             price change:   {}%",
            self.price,
            describe(&self.source),
            self.market_cap,
            self.circulating_supply,
            self.total_supply,
            self.sold_pct.round_dp(2),
            self.supply_remaining,
            self.price_change_pct.round_dp(2),
        )
    }
}

pub fn stats(pool: Option<&PoolState>, default_total_supply: u64) -> PoolStats {
    PoolStats::from_snapshot(pool, default_total_supply)
}

/// One trade replayed against the in-memory ledger
#[derive(Debug, Serialize)]
pub struct SimulationStep {
    pub action: LifecycleEvent,
    /// Lamports for a buy, tokens for a sell
    pub amount_in: u64,
    /// Advisory decimal quote: tokens for a buy, SOL for a sell
    pub advisory: Decimal,
    /// Integer quote: tokens for a buy, lamports for a sell
    pub exact: Option<u64>,
    /// What the ledger actually paid out, in the units of `exact`
    pub executed: u64,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub pool: PoolId,
    pub owner: AccountKey,
    pub initial: PoolStats,
    pub steps: Vec<SimulationStep>,
    pub close: CloseEligibility,
    pub price_after_close: Quote,
}

impl RenderText for SimulationReport {
    fn render_text(&self) -> String {
        let mut text = format!(
            "pool {}\ninitial price: {} SOL/token",
            self.pool, self.initial.price
        );
        for step in &self.steps {
            text.push_str(&format!(
                "\n{:?} {}: advisory {}, exact {}, executed {}",
                step.action,
                step.amount_in,
                step.advisory,
                step.exact.map_or_else(|| "-".to_string(), |v| v.to_string()),
                step.executed,
            ));
        }
        text.push_str(&format!(
            "\nclose allowed: {}\nprice after close: {} ({})",
            self.close.can_close,
            self.price_after_close.value,
            describe(&self.price_after_close.source),
        ));
        text
    }
}

/// Initialize, buy, sell back and close a pool on an in-memory ledger,
/// recording quotes next to what the ledger executed
pub fn simulate(defaults: &PoolDefaults, sol_in: Decimal) -> Result<SimulationReport> {
    let owner = AccountKey::new([1u8; 32]);
    let pool_id = PoolId::new([2u8; 32]);
    let lamports = sol_to_lamports(sol_in)
        .filter(|lamports| *lamports > 0)
        .context("Simulated buy must be at least one lamport")?;

    let mut ledger = InMemoryLedger::new();
    ledger.initialize(
        pool_id,
        owner,
        defaults.total_supply,
        defaults.virtual_sol_reserve,
        defaults.virtual_token_reserve,
    )?;

    let snapshot = load_snapshot(&ledger, &pool_id).into_option();
    let initial = PoolStats::from_snapshot(snapshot.as_ref(), defaults.total_supply);
    let mut steps = Vec::with_capacity(2);

    let advisory = buy_return(sol_in, snapshot.as_ref());
    let exact = snapshot.as_ref().and_then(|pool| exact_tokens_out(lamports, pool));
    let bought = ledger.buy(&pool_id, &owner, lamports)?;
    steps.push(SimulationStep {
        action: LifecycleEvent::Buy,
        amount_in: lamports,
        advisory,
        exact,
        executed: bought.amount_out,
    });

    let snapshot = load_snapshot(&ledger, &pool_id).into_option();
    let tokens = bought.amount_out;
    let advisory = sell_return(Decimal::from(tokens), snapshot.as_ref());
    let exact = snapshot.as_ref().and_then(|pool| exact_sol_out(tokens, pool));
    let sold = ledger.sell(&pool_id, &owner, tokens)?;
    steps.push(SimulationStep {
        action: LifecycleEvent::Sell,
        amount_in: tokens,
        advisory,
        exact,
        executed: sold.amount_out,
    });

    let snapshot = load_snapshot(&ledger, &pool_id).into_option();
    let close = can_close(snapshot.as_ref(), &owner);
    ledger.close(&pool_id, &owner)?;

    let after_close = load_snapshot(&ledger, &pool_id);
    let price_after_close = quote_price(after_close.as_option());

    info!(
        pool = %pool_id,
        bought = bought.amount_out,
        sold_for = sold.amount_out,
        "Simulation finished"
    );

    Ok(SimulationReport {
        pool: pool_id,
        owner,
        initial,
        steps,
        close,
        price_after_close,
    })
}
