use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use factura_core::{ClientId, InvoiceId};
use factura_invoicing::{Invoice, InvoiceDraft, LineItem};
use factura_reporting::{engine, period};

fn issued_at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
}

/// One year of invoices spread over all twelve months.
fn invoice_population(count: usize) -> Vec<Invoice> {
    let client_id = ClientId::new();
    (0..count)
        .map(|n| {
            let month = (n % 12) as u32 + 1;
            let day = (n % 28) as u32 + 1;
            InvoiceDraft {
                client_id,
                subject: "Bench".to_string(),
                issued_at: Some(issued_at(month, day)),
                lines: vec![LineItem {
                    description: "work".to_string(),
                    quantity: Decimal::ONE,
                    unit_price: Decimal::new(10_000 + n as i64, 2),
                    tax_rate: Decimal::new(20, 2),
                }],
            }
            .into_invoice(InvoiceId::new(), issued_at(month, day))
            .unwrap()
        })
        .collect()
}

fn bench_sum_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_totals");

    for size in [12, 120, 1_200, 12_000] {
        let invoices = invoice_population(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &invoices, |b, invoices| {
            b.iter(|| engine::sum_totals(black_box(invoices)).unwrap());
        });
    }

    group.finish();
}

fn bench_monthly_breakdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_breakdown");

    for size in [12, 120, 1_200, 12_000] {
        let invoices = invoice_population(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &invoices, |b, invoices| {
            b.iter(|| engine::monthly_breakdown(black_box(invoices)).unwrap());
        });
    }

    // The single-pass fold vs. twelve per-month range filters it replaces.
    let invoices = invoice_population(1_200);
    group.bench_function("single_pass_1200", |b| {
        b.iter(|| engine::monthly_breakdown(black_box(&invoices)).unwrap());
    });
    group.bench_function("per_month_requery_1200", |b| {
        b.iter(|| {
            let mut buckets = Vec::with_capacity(12);
            for month in 1..=12 {
                let (start, end) = period::month_range(2024, month).unwrap();
                let in_month: Vec<&Invoice> = invoices
                    .iter()
                    .filter(|i| i.issued_at >= start && i.issued_at <= end)
                    .collect();
                let mut total_ht = Decimal::ZERO;
                let mut total_ttc = Decimal::ZERO;
                for invoice in &in_month {
                    total_ht += invoice.total_ht;
                    total_ttc += invoice.total_ttc;
                }
                buckets.push((month, total_ht, total_ttc));
            }
            black_box(buckets)
        });
    });

    group.finish();
}

fn bench_period_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("period_math");
    group.sample_size(1000);

    group.bench_function("year_range", |b| {
        b.iter(|| period::year_range(black_box(2024)).unwrap());
    });
    group.bench_function("month_range", |b| {
        b.iter(|| period::month_range(black_box(2024), black_box(2)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sum_totals,
    bench_monthly_breakdown,
    bench_period_math
);
criterion_main!(benches);
