//! Theoretical curve samples for chart rendering
//!
//! [`sample_curve`] yields `point_count + 1` evenly spaced `(supply, price)`
//! pairs over `0..=total_supply`, priced at each *hypothetical* supply. The
//! iterator is lazy and cheap to clone; cloning or calling
//! [`CurveSamples::restart`] replays the identical sequence.

use crate::pricing::price_at_supply;
use rust_decimal::Decimal;
use serde::Serialize;
use types::PoolState;

/// One sampled point of the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    pub supply: u64,
    pub price: Decimal,
}

/// Lazy, finite sequence of curve samples
#[derive(Debug, Clone)]
pub struct CurveSamples<'a> {
    total_supply: u64,
    pool: Option<&'a PoolState>,
    point_count: u32,
    next_index: u64,
}

impl<'a> CurveSamples<'a> {
    /// Fresh iterator over the same samples
    pub fn restart(&self) -> Self {
        Self {
            next_index: 0,
            ..self.clone()
        }
    }

    /// `floor(index / point_count × total_supply)`, computed in integers
    fn supply_at(&self, index: u64) -> u64 {
        if self.point_count == 0 {
            return 0;
        }
        let scaled = index as u128 * self.total_supply as u128 / self.point_count as u128;
        // index <= point_count, so scaled <= total_supply
        scaled as u64
    }
}

impl Iterator for CurveSamples<'_> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > self.point_count as u64 {
            return None;
        }
        let supply = self.supply_at(self.next_index);
        self.next_index += 1;
        Some(CurvePoint {
            supply,
            price: price_at_supply(supply, self.pool),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.point_count as u64 + 1).saturating_sub(self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveSamples<'_> {}

/// Sample the curve at `point_count + 1` evenly spaced supplies
pub fn sample_curve(total_supply: u64, pool: Option<&PoolState>, point_count: u32) -> CurveSamples<'_> {
    CurveSamples {
        total_supply,
        pool,
        point_count,
        next_index: 0,
    }
}
