pub mod aggregate;
pub mod error;
pub mod month;
pub mod numeric;
pub mod ordered_map;
pub mod record;
pub mod tokenizer;

use aggregate::{Aggregator, MonthlySales, OrderStatsByMonth, TopItems};
use error::ReportError;
use numeric::NumericPolicy;
use record::Record;
use serde::Serialize;
use tracing::debug;

/// Knobs for a single analysis run
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    pub numeric_policy: NumericPolicy,
}

/// Every aggregate computed from one sales log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub overall_total: f64,
    pub monthly_sales: MonthlySales,
    pub top_items: TopItems,
    pub top_revenue_items: TopItems,
    pub order_stats: OrderStatsByMonth,
}

/// Tokenize a sales log and compute the full report
pub fn analyze(text: &str, options: &AnalyzeOptions) -> Result<SalesReport, ReportError> {
    let records = tokenizer::parse_records(text);

    debug!("Tokenized {} data lines", records.len());

    analyze_records(&records, options)
}

/// Compute the full report over already tokenized records
pub fn analyze_records(
    records: &[Record<'_>],
    options: &AnalyzeOptions,
) -> Result<SalesReport, ReportError> {
    let aggregator = Aggregator::new(records, options.numeric_policy);

    let overall_total = aggregator.overall_total();
    let monthly_sales = aggregator.monthly_sales()?;
    let top_items = aggregator.top_items_by_quantity()?;
    let top_revenue_items = aggregator.top_items_by_revenue()?;
    let order_stats = aggregator.order_stats(&top_items)?;

    Ok(SalesReport {
        overall_total,
        monthly_sales,
        top_items,
        top_revenue_items,
        order_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregate::OrderStats;

    const SAMPLE: &str = "date,item,category,quantity,revenue\n\
                          2024-03-01,Widget,Tools,5,50.0\n\
                          2024-03-05,Gadget,Tools,3,45.0\n\
                          2024-04-01,Widget,Tools,2,20.0\n";

    #[test]
    fn test_analyze_sample() {
        let report = analyze(SAMPLE, &AnalyzeOptions::default()).unwrap();

        assert_eq!(report.overall_total, 115.0);

        let sales: Vec<_> = report.monthly_sales.iter().collect();
        assert_eq!(sales, [("2024-3", &95.0), ("2024-4", &20.0)]);

        let top: Vec<_> = report.top_items.iter().collect();
        assert_eq!(
            top,
            [("2024-3", &"Widget".to_owned()), ("2024-4", &"Widget".to_owned())]
        );
        assert_eq!(report.top_revenue_items, report.top_items);

        assert_eq!(
            report.order_stats.get("2024-3"),
            Some(&OrderStats {
                min: 5.0,
                max: 5.0,
                avg: 5.0,
            })
        );
        assert_eq!(
            report.order_stats.get("2024-4"),
            Some(&OrderStats {
                min: 2.0,
                max: 2.0,
                avg: 2.0,
            })
        );
    }

    #[test]
    fn test_analyze_header_only() {
        let report = analyze("date,item,category,quantity,revenue\n", &AnalyzeOptions::default())
            .unwrap();

        assert_eq!(report.overall_total, 0.0);
        assert!(report.monthly_sales.is_empty());
        assert!(report.top_items.is_empty());
        assert!(report.top_revenue_items.is_empty());
        assert!(report.order_stats.is_empty());
    }

    #[test]
    fn test_analyze_crlf() {
        let crlf = SAMPLE.replace('\n', "\r\n");

        assert_eq!(
            analyze(&crlf, &AnalyzeOptions::default()).unwrap(),
            analyze(SAMPLE, &AnalyzeOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_analyze_without_trailing_newline() {
        let trimmed = SAMPLE.trim_end_matches('\n');
        let report = analyze(trimmed, &AnalyzeOptions::default()).unwrap();

        assert_eq!(report.overall_total, 115.0);
    }

    #[test]
    fn test_report_serializes_in_insertion_order() {
        let text = "h\n2024-10-01,A,X,1,1\n2024-9-01,B,X,1,2\n";
        let report = analyze(text, &AnalyzeOptions::default()).unwrap();
        let json = serde_json::to_string(&report.monthly_sales).unwrap();

        assert_eq!(json, r#"{"2024-10":1.0,"2024-9":2.0}"#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// One data line: well-formed with integral cents, or a short row.
    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => (
                2000u32..2030,
                1u32..=12,
                1u32..=28,
                prop::sample::select(vec!["Widget", "Gadget", "Sprocket", "Gizmo"]),
                0u32..50,
                0u32..100_000,
            )
                .prop_map(|(year, month, day, item, quantity, cents)| {
                    format!(
                        "{year}-{month:02}-{day:02},{item},Tools,{quantity},{}.{:02}",
                        cents / 100,
                        cents % 100
                    )
                }),
            1 => "[a-z]{0,6}(,[a-z]{0,6}){0,3}",
        ]
    }

    fn log_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(line_strategy(), 0..60).prop_map(|lines| {
            let mut text = String::from("date,item,category,quantity,revenue\n");
            for line in lines {
                text.push_str(&line);
                text.push('\n');
            }
            text
        })
    }

    #[test]
    fn total_matches_monthly_sum() {
        proptest!(|(text in log_strategy())| {
            let report = analyze(&text, &AnalyzeOptions::default()).unwrap();
            let monthly: f64 = report.monthly_sales.values().sum();

            prop_assert!(
                (report.overall_total - monthly).abs() < 1e-6,
                "total {} differs from monthly sum {}",
                report.overall_total,
                monthly
            );
        });
    }

    #[test]
    fn month_keys_are_unpadded() {
        proptest!(|(text in log_strategy())| {
            let report = analyze(&text, &AnalyzeOptions::default()).unwrap();

            for month in report.monthly_sales.keys() {
                let (year, month_part) = month.split_once('-').unwrap();
                prop_assert_eq!(year.len(), 4);
                prop_assert!(!month_part.starts_with('0'), "padded month key {}", month);
                let value: u32 = month_part.parse().unwrap();
                prop_assert!((1..=12).contains(&value));
            }
        });
    }

    #[test]
    fn analysis_is_idempotent() {
        proptest!(|(text in log_strategy())| {
            let first = analyze(&text, &AnalyzeOptions::default()).unwrap();
            let second = analyze(&text, &AnalyzeOptions::default()).unwrap();

            prop_assert_eq!(first, second);
        });
    }

    #[test]
    fn short_rows_do_not_change_report() {
        proptest!(|(text in log_strategy())| {
            let full_rows: String = text
                .split_terminator('\n')
                .enumerate()
                .filter(|(index, line)| *index == 0 || line.split(',').count() >= 5)
                .map(|(_, line)| format!("{line}\n"))
                .collect();

            prop_assert_eq!(
                analyze(&text, &AnalyzeOptions::default()).unwrap(),
                analyze(&full_rows, &AnalyzeOptions::default()).unwrap()
            );
        });
    }

    #[test]
    fn zero_quantity_months_have_no_order_stats() {
        proptest!(|(text in log_strategy())| {
            let report = analyze(&text, &AnalyzeOptions::default()).unwrap();

            for (month, top) in report.top_items.iter() {
                prop_assert_eq!(top.is_empty(), !report.order_stats.contains_key(month));
            }
        });
    }
}
