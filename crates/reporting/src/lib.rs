//! `factura-reporting` — the aggregation engine and its facade.
//!
//! Split the way the data flows: [`period`] turns a year or year+month into an
//! inclusive instant range, [`engine`] folds invoices into totals, and
//! [`service`] composes both behind the injected store handle with the access
//! check in front.

pub mod engine;
pub mod period;
pub mod service;

pub use engine::{MonthBucket, PeriodTotals, monthly_breakdown, sum_totals};
pub use period::{MONTH_LABELS, month_range, year_range};
pub use service::{BreakdownSummary, MonthlySummary, ReportingService, YearlySummary};
