//! Request DTOs and JSON mapping helpers.
//!
//! Response shaping lives here so the wire contract stays in one place:
//! invoice totals travel under their accounting names (`totalHT`/`totalTTC`)
//! and user records never carry the password hash.

use serde::Deserialize;
use serde_json::json;

use factura_auth::UserRecord;
use factura_clients::{Client, StatusCounts};
use factura_invoicing::{Invoice, LineItem};
use factura_reporting::{BreakdownSummary, MonthlySummary, YearlySummary};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// User record minus credential secrets.
pub fn user_to_json(user: &UserRecord) -> serde_json::Value {
    json!({
        "id": user.id,
        "email": user.email,
        "display_name": user.display_name,
        "role": user.role,
    })
}

pub fn client_to_json(client: &Client) -> serde_json::Value {
    json!({
        "id": client.id,
        "name": client.name,
        "billing_name": client.billing_name,
        "address": client.address,
        "postal_code": client.postal_code,
        "city": client.city,
        "tax_id": client.tax_id,
        "email": client.email,
        "status": client.status,
    })
}

pub fn status_counts_to_json(counts: StatusCounts) -> serde_json::Value {
    json!({
        "active": counts.active,
        "inactive": counts.inactive,
        "total": counts.total,
    })
}

pub fn invoice_to_json(invoice: &Invoice) -> serde_json::Value {
    json!({
        "id": invoice.id,
        "client_id": invoice.client_id,
        "subject": invoice.subject,
        "issued_at": invoice.issued_at,
        "lines": invoice.lines.iter().map(line_to_json).collect::<Vec<_>>(),
        "totalHT": invoice.total_ht,
        "totalTTC": invoice.total_ttc,
    })
}

fn line_to_json(line: &LineItem) -> serde_json::Value {
    json!({
        "description": line.description,
        "quantity": line.quantity,
        "unit_price": line.unit_price,
        "tax_rate": line.tax_rate,
    })
}

pub fn yearly_to_json(summary: &YearlySummary) -> serde_json::Value {
    json!({
        "year": summary.year,
        "totalHT": summary.totals.total_ht,
        "totalTTC": summary.totals.total_ttc,
    })
}

pub fn monthly_to_json(summary: &MonthlySummary) -> serde_json::Value {
    json!({
        "year": summary.year,
        "month": summary.month,
        "totalHT": summary.totals.total_ht,
        "totalTTC": summary.totals.total_ttc,
    })
}

pub fn breakdown_to_json(summary: &BreakdownSummary) -> serde_json::Value {
    json!({
        "year": summary.year,
        "months": summary
            .months
            .iter()
            .map(|bucket| json!({
                "label": bucket.label,
                "totalHT": bucket.total_ht,
                "totalTTC": bucket.total_ttc,
            }))
            .collect::<Vec<_>>(),
    })
}
