use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use factura_core::{ClientId, Error, InvoiceId, Result};

/// One billed position on an invoice.
///
/// `tax_rate` is a fraction, not a percentage: 0.20 means 20% VAT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub tax_rate: Decimal,
}

impl LineItem {
    fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::invalid_argument("line description cannot be empty"));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(Error::invalid_argument("line quantity must be positive"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(Error::invalid_argument("line unit price cannot be negative"));
        }
        if self.tax_rate < Decimal::ZERO {
            return Err(Error::invalid_argument("line tax rate cannot be negative"));
        }
        Ok(())
    }

    fn amount_ht(&self) -> Result<Decimal> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or_else(|| Error::invalid_argument("invoice line amount overflow"))
    }

    fn amount_ttc(&self) -> Result<Decimal> {
        let multiplier = Decimal::ONE
            .checked_add(self.tax_rate)
            .ok_or_else(|| Error::invalid_argument("invoice line tax rate overflow"))?;
        self.amount_ht()?
            .checked_mul(multiplier)
            .ok_or_else(|| Error::invalid_argument("invoice line amount overflow"))
    }
}

/// Pre-tax and tax-inclusive totals of a line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvoiceTotals {
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
}

/// Fold validated lines into invoice totals.
///
/// `total_ht = Σ quantity × unit_price`,
/// `total_ttc = Σ quantity × unit_price × (1 + tax_rate)`.
pub fn compute_totals(lines: &[LineItem]) -> Result<InvoiceTotals> {
    let mut totals = InvoiceTotals::default();
    for line in lines {
        totals.total_ht = totals
            .total_ht
            .checked_add(line.amount_ht()?)
            .ok_or_else(|| Error::invalid_argument("invoice total overflow"))?;
        totals.total_ttc = totals
            .total_ttc
            .checked_add(line.amount_ttc()?)
            .ok_or_else(|| Error::invalid_argument("invoice total overflow"))?;
    }
    Ok(totals)
}

/// A stored invoice.
///
/// `total_ht`/`total_ttc` are derived fields: every constructor and update
/// path recomputes them from `lines`, so readers (including the reporting
/// engine) can rely on them without re-deriving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub client_id: ClientId,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
}

impl Invoice {
    /// Apply an allow-listed update.
    ///
    /// Absent fields keep their stored value. Replacing the lines revalidates
    /// them and recomputes both totals; there is no path that writes totals
    /// directly.
    pub fn apply(&mut self, patch: &InvoicePatch) -> Result<()> {
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(subject) = &patch.subject {
            self.subject = validate_subject(subject)?;
        }
        if let Some(issued_at) = patch.issued_at {
            self.issued_at = issued_at;
        }
        if let Some(lines) = &patch.lines {
            validate_lines(lines)?;
            let totals = compute_totals(lines)?;
            self.lines = lines.clone();
            self.total_ht = totals.total_ht;
            self.total_ttc = totals.total_ttc;
        }
        Ok(())
    }
}

/// Payload for creating an invoice.
///
/// Carries no totals fields: a request body smuggling `totalHT`/`totalTTC`
/// is dropped during deserialization and the stored totals come from the
/// lines alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub client_id: ClientId,
    pub subject: String,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    pub lines: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Validate the draft and build the record under a fresh identity.
    ///
    /// `now` becomes the issue instant when the draft does not carry one.
    pub fn into_invoice(self, id: InvoiceId, now: DateTime<Utc>) -> Result<Invoice> {
        validate_lines(&self.lines)?;
        let totals = compute_totals(&self.lines)?;

        Ok(Invoice {
            id,
            client_id: self.client_id,
            subject: validate_subject(&self.subject)?,
            issued_at: self.issued_at.unwrap_or(now),
            lines: self.lines,
            total_ht: totals.total_ht,
            total_ttc: totals.total_ttc,
        })
    }
}

/// Allow-listed update for an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePatch {
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lines: Option<Vec<LineItem>>,
}

fn validate_subject(raw: &str) -> Result<String> {
    let subject = raw.trim();
    if subject.is_empty() {
        return Err(Error::invalid_argument("invoice subject cannot be empty"));
    }
    Ok(subject.to_string())
}

fn validate_lines(lines: &[LineItem]) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::invalid_argument(
            "cannot store an invoice without lines",
        ));
    }
    for line in lines {
        line.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn line(quantity: &str, unit_price: &str, tax_rate: &str) -> LineItem {
        LineItem {
            description: "consulting".to_string(),
            quantity: quantity.parse().unwrap(),
            unit_price: unit_price.parse().unwrap(),
            tax_rate: tax_rate.parse().unwrap(),
        }
    }

    fn draft(lines: Vec<LineItem>) -> InvoiceDraft {
        InvoiceDraft {
            client_id: ClientId::new(),
            subject: "Site redesign".to_string(),
            issued_at: None,
            lines,
        }
    }

    #[test]
    fn totals_cover_tax_per_line() {
        let totals = compute_totals(&[
            line("2", "100", "0.20"),
            line("1", "50", "0.10"),
        ])
        .unwrap();

        assert_eq!(totals.total_ht, d("250"));
        assert_eq!(totals.total_ttc, d("295"));
    }

    #[test]
    fn empty_lines_are_rejected() {
        let result = draft(vec![]).into_invoice(InvoiceId::new(), Utc::now());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let result = draft(vec![line("0", "100", "0.20")])
            .into_invoice(InvoiceId::new(), Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn draft_defaults_issue_instant_to_now() {
        let now = Utc::now();
        let invoice = draft(vec![line("1", "100", "0.20")])
            .into_invoice(InvoiceId::new(), now)
            .unwrap();

        assert_eq!(invoice.issued_at, now);
        assert_eq!(invoice.total_ht, d("100"));
        assert_eq!(invoice.total_ttc, d("120"));
    }

    #[test]
    fn smuggled_totals_in_a_create_payload_are_dropped() {
        let raw = r#"{
            "client_id": "018f2f7a-0000-7000-8000-000000000001",
            "subject": "Audit",
            "lines": [
                { "description": "audit", "quantity": "1", "unit_price": "100", "tax_rate": "0.2" }
            ],
            "total_ht": "9999",
            "totalTTC": "9999"
        }"#;
        let parsed: InvoiceDraft = serde_json::from_str(raw).unwrap();
        let invoice = parsed.into_invoice(InvoiceId::new(), Utc::now()).unwrap();

        assert_eq!(invoice.total_ht, d("100"));
        assert_eq!(invoice.total_ttc, d("120"));
    }

    #[test]
    fn patch_recomputes_totals_when_lines_change() {
        let mut invoice = draft(vec![line("1", "100", "0.20")])
            .into_invoice(InvoiceId::new(), Utc::now())
            .unwrap();

        let patch = InvoicePatch {
            lines: Some(vec![line("3", "10", "0")]),
            ..InvoicePatch::default()
        };
        invoice.apply(&patch).unwrap();

        assert_eq!(invoice.total_ht, d("30"));
        assert_eq!(invoice.total_ttc, d("30"));
    }

    #[test]
    fn patch_without_lines_keeps_totals() {
        let mut invoice = draft(vec![line("1", "100", "0.20")])
            .into_invoice(InvoiceId::new(), Utc::now())
            .unwrap();

        let patch = InvoicePatch {
            subject: Some("Follow-up".to_string()),
            ..InvoicePatch::default()
        };
        invoice.apply(&patch).unwrap();

        assert_eq!(invoice.subject, "Follow-up");
        assert_eq!(invoice.total_ht, d("100"));
        assert_eq!(invoice.total_ttc, d("120"));
    }

    #[test]
    fn patch_rejects_invalid_replacement_lines() {
        let mut invoice = draft(vec![line("1", "100", "0.20")])
            .into_invoice(InvoiceId::new(), Utc::now())
            .unwrap();

        let patch = InvoicePatch {
            lines: Some(vec![]),
            ..InvoicePatch::default()
        };
        assert!(invoice.apply(&patch).is_err());
        assert_eq!(invoice.total_ht, d("100"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: with non-negative tax rates, the tax-inclusive total is
        /// never below the pre-tax total, and both are non-negative.
        #[test]
        fn ttc_dominates_ht(
            raw_lines in prop::collection::vec(
                (1i64..=1_000i64, 0i64..=100_000i64, 0i64..=3_000i64),
                1..8,
            )
        ) {
            let lines: Vec<LineItem> = raw_lines
                .into_iter()
                .map(|(q, p, t)| LineItem {
                    description: "x".to_string(),
                    quantity: Decimal::new(q, 1),
                    unit_price: Decimal::new(p, 2),
                    tax_rate: Decimal::new(t, 4),
                })
                .collect();

            let totals = compute_totals(&lines).unwrap();
            prop_assert!(totals.total_ht >= Decimal::ZERO);
            prop_assert!(totals.total_ttc >= totals.total_ht);
        }

        /// Property: totals are additive over concatenation, which is what the
        /// period aggregation relies on when it sums stored totals.
        #[test]
        fn totals_are_additive(
            left in prop::collection::vec((1i64..=500i64, 0i64..=50_000i64), 1..5),
            right in prop::collection::vec((1i64..=500i64, 0i64..=50_000i64), 1..5),
        ) {
            let to_lines = |pairs: Vec<(i64, i64)>| -> Vec<LineItem> {
                pairs
                    .into_iter()
                    .map(|(q, p)| LineItem {
                        description: "x".to_string(),
                        quantity: Decimal::new(q, 0),
                        unit_price: Decimal::new(p, 2),
                        tax_rate: Decimal::new(20, 2),
                    })
                    .collect()
            };

            let left = to_lines(left);
            let right = to_lines(right);
            let mut combined = left.clone();
            combined.extend(right.iter().cloned());

            let sum_parts = {
                let a = compute_totals(&left).unwrap();
                let b = compute_totals(&right).unwrap();
                InvoiceTotals {
                    total_ht: a.total_ht + b.total_ht,
                    total_ttc: a.total_ttc + b.total_ttc,
                }
            };
            let whole = compute_totals(&combined).unwrap();

            prop_assert_eq!(whole, sum_parts);
        }
    }
}
