//! Pure aggregation over stored invoice totals.
//!
//! The engine never touches storage and never re-derives totals from line
//! items: invoice writes keep the stored `total_ht`/`total_ttc` consistent,
//! so summing the stored fields is exact.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use factura_core::{Error, Result};
use factura_invoicing::Invoice;

use crate::period::MONTH_LABELS;

/// Summed totals of one period.
///
/// Zero for a period with no invoices; an empty period is a result, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct PeriodTotals {
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
}

/// One month's slot in a yearly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// 1-indexed calendar month.
    pub month: u32,
    pub label: &'static str,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
}

impl MonthBucket {
    fn zero(month: u32) -> Self {
        Self {
            month,
            label: MONTH_LABELS[(month - 1) as usize],
            total_ht: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
        }
    }
}

/// Sum the stored totals of `invoices`.
///
/// Every addition is checked: a sum that leaves `Decimal`'s range is an
/// `InvalidArgument`, not a panic.
pub fn sum_totals(invoices: &[Invoice]) -> Result<PeriodTotals> {
    let mut totals = PeriodTotals::default();
    for invoice in invoices {
        totals.total_ht = checked_sum(totals.total_ht, invoice.total_ht)?;
        totals.total_ttc = checked_sum(totals.total_ttc, invoice.total_ttc)?;
    }
    Ok(totals)
}

/// Bucket `invoices` by calendar month of their issue instant.
///
/// The table is pre-seeded with twelve zero slots in calendar order and the
/// invoices are merged into it, so the result always has exactly 12 entries
/// however sparse the year was. Callers pass one year's invoices; the fold
/// is a single pass, not a per-month re-query. Additions are checked the
/// same way as [`sum_totals`].
pub fn monthly_breakdown(invoices: &[Invoice]) -> Result<[MonthBucket; 12]> {
    let mut buckets: [MonthBucket; 12] = core::array::from_fn(|i| MonthBucket::zero(i as u32 + 1));

    for invoice in invoices {
        let slot = (invoice.issued_at.month() - 1) as usize;
        buckets[slot].total_ht = checked_sum(buckets[slot].total_ht, invoice.total_ht)?;
        buckets[slot].total_ttc = checked_sum(buckets[slot].total_ttc, invoice.total_ttc)?;
    }

    Ok(buckets)
}

fn checked_sum(acc: Decimal, amount: Decimal) -> Result<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| Error::invalid_argument("period total overflow"))
}
