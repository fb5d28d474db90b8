//! Overtime tiering.
//!
//! This module provides the pure function that splits total worked hours
//! into regular, time-and-a-half, and double-time bands given a daily
//! threshold and the width of the 1.5x band.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default width of the 1.5x band; hours beyond threshold + span are paid
/// at double time.
pub const DEFAULT_TIER_ONE_SPAN: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The split of total hours into pay-rate bands.
///
/// For any non-negative total, `regular + overtime_1_5 + overtime_2_0`
/// equals the total and every band is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSplit {
    /// Hours paid at the regular rate (up to the threshold).
    pub regular: Decimal,
    /// Hours in the 1.5x band (above the threshold, up to the span).
    pub overtime_1_5: Decimal,
    /// Hours in the 2.0x band (everything beyond threshold + span).
    pub overtime_2_0: Decimal,
}

impl TierSplit {
    /// Returns the sum of all three bands.
    pub fn total(&self) -> Decimal {
        self.regular + self.overtime_1_5 + self.overtime_2_0
    }
}

/// Splits total hours into regular/1.5x/2.0x bands.
///
/// This is a pure, side-effect-free function. Whether hours are aggregated
/// daily or weekly before tiering is the caller's decision.
///
/// # Arguments
///
/// * `total_hours` - The total hours to split
/// * `threshold` - Hours paid at the regular rate before overtime starts
/// * `tier_one_span` - Width of the 1.5x band; hours beyond it are 2.0x
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{tier, DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_TIER_ONE_SPAN};
/// use rust_decimal::Decimal;
///
/// // A 9-hour day with an 8-hour threshold: one hour of time-and-a-half.
/// let split = tier(
///     Decimal::new(9, 0),
///     DEFAULT_DAILY_OVERTIME_THRESHOLD,
///     DEFAULT_TIER_ONE_SPAN,
/// );
/// assert_eq!(split.regular, Decimal::new(8, 0));
/// assert_eq!(split.overtime_1_5, Decimal::new(1, 0));
/// assert_eq!(split.overtime_2_0, Decimal::ZERO);
/// ```
pub fn tier(total_hours: Decimal, threshold: Decimal, tier_one_span: Decimal) -> TierSplit {
    let regular = total_hours.min(threshold);
    let overtime_1_5 = (total_hours - threshold).min(tier_one_span).max(Decimal::ZERO);
    let overtime_2_0 = (total_hours - threshold - tier_one_span).max(Decimal::ZERO);

    TierSplit {
        regular,
        overtime_1_5,
        overtime_2_0,
    }
}
