use crate::config::OutputFormat;
use anyhow::{Context, Result};
use sales_aggregator::SalesReport;
use serde::Serialize;
use std::io::Write;

/// One month of the report flattened into a CSV row
#[derive(Debug, Serialize)]
struct MonthRow<'a> {
    month: &'a str,
    sales: f64,
    top_item: &'a str,
    top_revenue_item: &'a str,
    min_order: Option<f64>,
    max_order: Option<f64>,
    avg_order: Option<f64>,
}

/// Writes `report` to `out` in the requested format
pub fn write_report<W: Write>(report: &SalesReport, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, out),
        OutputFormat::Csv => write_csv(report, out),
        OutputFormat::Json => write_json(report, out),
    }
}

fn number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    value.to_string()
}

fn write_text<W: Write>(report: &SalesReport, mut out: W) -> Result<()> {
    writeln!(out, "Total Sales: {}", number(report.overall_total))?;

    writeln!(out, "Monthly Sales Totals:")?;
    for (month, sales) in report.monthly_sales.iter() {
        writeln!(out, "  {month}: {}", number(*sales))?;
    }

    writeln!(out, "Top Items by Month:")?;
    for (month, item) in report.top_items.iter() {
        writeln!(out, "  {month}: {item:?}")?;
    }

    writeln!(out, "Highest Revenue Items by Month:")?;
    for (month, item) in report.top_revenue_items.iter() {
        writeln!(out, "  {month}: {item:?}")?;
    }

    writeln!(out, "Order Stats for Top Items by Month:")?;
    for (month, stats) in report.order_stats.iter() {
        writeln!(
            out,
            "  {month}: min {}, max {}, avg {}",
            number(stats.min),
            number(stats.max),
            number(stats.avg)
        )?;
    }

    out.flush().context("Failed to flush report")?;

    Ok(())
}

fn write_csv<W: Write>(report: &SalesReport, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);

    for (month, &sales) in report.monthly_sales.iter() {
        let stats = report.order_stats.get(month);
        let row = MonthRow {
            month,
            sales,
            top_item: report.top_items.get(month).map_or("", String::as_str),
            top_revenue_item: report.top_revenue_items.get(month).map_or("", String::as_str),
            min_order: stats.map(|s| s.min),
            max_order: stats.map(|s| s.max),
            avg_order: stats.map(|s| s.avg),
        };

        writer
            .serialize(&row)
            .with_context(|| format!("Failed to serialize month {month}"))?;
    }

    writer.flush().context("Failed to flush report")?;

    Ok(())
}

fn write_json<W: Write>(report: &SalesReport, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    out.flush().context("Failed to flush report")?;

    Ok(())
}
