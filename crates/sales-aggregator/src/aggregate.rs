use crate::error::{NumberError, ReportError};
use crate::month::month_key;
use crate::numeric::NumericPolicy;
use crate::ordered_map::{NestedMap, OrderedMap};
use crate::record::Record;
use serde::Serialize;
use tracing::debug;

/// Month key -> summed revenue
pub type MonthlySales = OrderedMap<f64>;

/// Month key -> winning item, empty when no item beat zero
pub type TopItems = OrderedMap<String>;

/// Month key -> order statistics for that month's top item
pub type OrderStatsByMonth = OrderedMap<OrderStats>;

/// Per-order quantity statistics for one month's best seller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl OrderStats {
    /// Returns `None` for an empty list.
    fn from_quantities(quantities: &[f64]) -> Option<Self> {
        let first = *quantities.first()?;
        let mut min = first;
        let mut max = first;
        let mut sum = 0.0;

        for &quantity in quantities {
            if quantity < min {
                min = quantity;
            }
            if quantity > max {
                max = quantity;
            }
            sum += quantity;
        }

        Some(Self {
            min,
            max,
            avg: sum / quantities.len() as f64,
        })
    }
}

/// Adds `value` to a running bucket. A bucket left at NaN by an earlier
/// unparseable field starts again from zero.
fn add_to_bucket(bucket: &mut f64, value: f64) {
    if bucket.is_nan() {
        *bucket = 0.0;
    }
    *bucket += value;
}

/// Item with the strictly largest total, scanning in insertion order.
///
/// The incumbent starts at zero with an empty name, so ties keep the earlier
/// item and a month whose totals are all zero, negative or NaN yields `""`.
fn pick_top(totals: &OrderedMap<f64>) -> String {
    let mut max = 0.0;
    let mut top = "";

    for (item, &total) in totals.iter() {
        if total > max {
            max = total;
            top = item;
        }
    }

    top.to_owned()
}

fn pick_top_per_month(grouped: &NestedMap<f64>) -> TopItems {
    grouped
        .iter()
        .map(|(month, totals)| (month, pick_top(totals)))
        .collect()
}

/// Single-pass reducers over one tokenized sales log
///
/// Rows with fewer than five columns are invisible to every method.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'r, 'a> {
    records: &'r [Record<'a>],
    policy: NumericPolicy,
}

impl<'r, 'a> Aggregator<'r, 'a> {
    pub fn new(records: &'r [Record<'a>], policy: NumericPolicy) -> Self {
        Self { records, policy }
    }

    fn well_formed(&self) -> impl Iterator<Item = &'r Record<'a>> {
        self.records.iter().filter(|record| record.is_well_formed())
    }

    /// Sum of revenue over all rows. One unparseable revenue under
    /// [`NumericPolicy::Propagate`] makes the result NaN.
    pub fn overall_total(&self) -> f64 {
        let total = self
            .well_formed()
            .filter_map(|record| self.policy.resolve(record.revenue()))
            .fold(0.0, |total, revenue| total + revenue);

        debug!("Overall total {total}");

        total
    }

    /// Revenue summed per month, months in order of first appearance.
    pub fn monthly_sales(&self) -> Result<MonthlySales, ReportError> {
        let mut sales = MonthlySales::new();

        for record in self.well_formed() {
            let month = month_key(record)?;
            let Some(revenue) = self.policy.resolve(record.revenue()) else {
                continue;
            };

            add_to_bucket(sales.entry_or_default(&month), revenue);
        }

        debug!("Monthly sales computed for {} months", sales.len());

        Ok(sales)
    }

    /// Best-selling item per month by total quantity.
    pub fn top_items_by_quantity(&self) -> Result<TopItems, ReportError> {
        let grouped = self.group_by_month_and_item(Record::quantity)?;
        let top = pick_top_per_month(&grouped);

        debug!("Top items by quantity computed for {} months", top.len());

        Ok(top)
    }

    /// Highest-grossing item per month by total revenue.
    pub fn top_items_by_revenue(&self) -> Result<TopItems, ReportError> {
        let grouped = self.group_by_month_and_item(Record::revenue)?;
        let top = pick_top_per_month(&grouped);

        debug!("Top items by revenue computed for {} months", top.len());

        Ok(top)
    }

    /// Min, max and mean order quantity of each month's top item.
    ///
    /// `top_items` is the output of [`Self::top_items_by_quantity`]. Months
    /// whose top item is empty have no matching orders and are left out.
    pub fn order_stats(&self, top_items: &TopItems) -> Result<OrderStatsByMonth, ReportError> {
        let mut orders: OrderedMap<Vec<f64>> = OrderedMap::new();

        for record in self.well_formed() {
            let month = month_key(record)?;

            let is_top = top_items
                .get(&month)
                .is_some_and(|top| !top.is_empty() && top == record.item());
            if !is_top {
                continue;
            }

            let Some(quantity) = self.policy.resolve(record.quantity()) else {
                continue;
            };

            orders.entry_or_default(&month).push(quantity);
        }

        let stats: OrderStatsByMonth = orders
            .iter()
            .filter_map(|(month, quantities)| {
                OrderStats::from_quantities(quantities).map(|stats| (month, stats))
            })
            .collect();

        debug!("Order stats computed for {} months", stats.len());

        Ok(stats)
    }

    fn group_by_month_and_item<F>(&self, field: F) -> Result<NestedMap<f64>, ReportError>
    where
        F: Fn(&Record<'a>) -> Result<f64, NumberError>,
    {
        let mut grouped = NestedMap::new();

        for record in self.well_formed() {
            let month = month_key(record)?;
            let Some(value) = self.policy.resolve(field(record)) else {
                continue;
            };

            let bucket = grouped
                .entry_or_default(&month)
                .entry_or_default(record.item());
            add_to_bucket(bucket, value);
        }

        Ok(grouped)
    }
}
