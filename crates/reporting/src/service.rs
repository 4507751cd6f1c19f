//! Reporting facade: authorization, period validation, one store query, fold.

use std::sync::Arc;

use serde::Serialize;

use factura_auth::{Caller, Capability, authorize};
use factura_core::Result;
use factura_store::InvoiceStore;

use crate::engine::{self, MonthBucket, PeriodTotals};
use crate::period;

/// Totals of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlySummary {
    pub year: i32,
    pub totals: PeriodTotals,
}

/// Totals of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    /// 1-indexed calendar month.
    pub month: u32,
    pub totals: PeriodTotals,
}

/// Month-by-month totals of one calendar year, always twelve entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownSummary {
    pub year: i32,
    pub months: [MonthBucket; 12],
}

/// The reporting entry points behind one injected store handle.
///
/// Every operation follows the same order: authorize the caller, validate
/// the period (store untouched on failure), run the single range query,
/// fold. Empty periods produce zero totals, never an error.
pub struct ReportingService {
    invoices: Arc<dyn InvoiceStore>,
}

impl ReportingService {
    pub fn new(invoices: Arc<dyn InvoiceStore>) -> Self {
        Self { invoices }
    }

    pub fn yearly(&self, caller: &Caller, year: i32) -> Result<YearlySummary> {
        authorize(caller, Capability::ViewReports)?;
        let (start, end) = period::year_range(year)?;

        let invoices = self.invoices.find_issued_between(start, end)?;
        let totals = engine::sum_totals(&invoices)?;
        tracing::debug!(year, invoices = invoices.len(), "computed yearly totals");

        Ok(YearlySummary { year, totals })
    }

    pub fn monthly(&self, caller: &Caller, year: i32, month: u32) -> Result<MonthlySummary> {
        authorize(caller, Capability::ViewReports)?;
        let (start, end) = period::month_range(year, month)?;

        let invoices = self.invoices.find_issued_between(start, end)?;
        let totals = engine::sum_totals(&invoices)?;
        tracing::debug!(year, month, invoices = invoices.len(), "computed monthly totals");

        Ok(MonthlySummary { year, month, totals })
    }

    pub fn breakdown(&self, caller: &Caller, year: i32) -> Result<BreakdownSummary> {
        authorize(caller, Capability::ViewReports)?;
        let (start, end) = period::year_range(year)?;

        let invoices = self.invoices.find_issued_between(start, end)?;
        let months = engine::monthly_breakdown(&invoices)?;
        tracing::debug!(year, invoices = invoices.len(), "computed yearly breakdown");

        Ok(BreakdownSummary { year, months })
    }
}
