use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::parse::ListingTable;
use crate::stats;
use crate::torn::{ListingRecord, WatchList};

/// Summarized statistics about the bazaar listings of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    /// The average price per unit across all listed units, weighting each listing by
    /// its quantity: `sum(cost * quantity) / sum(quantity)`.
    ///
    /// `None` when the total quantity is `0`, including when there are no listings.
    pub average_price: Option<f64>,

    /// The median of the listing costs. Each listing counts once regardless of its
    /// quantity.
    pub median_price: Option<f64>,

    /// The sample standard deviation of the listing costs. Unlike
    /// [`average_price`](`Self::average_price`), this is _not_ weighted by quantity.
    ///
    /// Since you cannot calculate a sample standard deviation of fewer than two data
    /// points, this is `0.0` for zero or one listings.
    pub std_dev: f64,

    /// The cheapest listing.
    pub min_price: Option<f64>,

    /// The most expensive listing.
    pub max_price: Option<f64>,

    /// The total **units** available. For example, if there are two listings, one with a
    /// quantity of `20` and the other `40`, this field will be `60`.
    pub total_qty: u64,

    /// The number of listings, regardless of the quantity of each.
    pub num_listings: usize,
}

impl ItemSummary {
    /// Computes the summary of `listings`, which should all be for the same item.
    pub fn from_listings(listings: &[ListingRecord]) -> Self {
        let costs: Vec<f64> = listings.iter().map(|l| l.cost).collect();
        let cost_qty: Vec<(f64, u64)> = listings.iter().map(|l| (l.cost, l.quantity)).collect();

        ItemSummary {
            average_price: stats::weighted_mean(&cost_qty),
            median_price: stats::median(&costs),
            std_dev: stats::std_dev(&costs, false).unwrap_or(0.0),
            min_price: stats::min(&costs),
            max_price: stats::max(&costs),
            total_qty: listings.iter().map(|l| l.quantity).sum(),
            num_listings: listings.len(),
        }
    }

    /// The price below which a listing counts as an outlier: one standard deviation
    /// below the average price.
    ///
    /// `None` when there are fewer than two listings, or no average price.
    pub fn outlier_threshold(&self) -> Option<f64> {
        if self.num_listings < 2 {
            return None;
        }
        self.average_price.map(|avg| avg - self.std_dev)
    }

    /// The listings priced strictly below [`outlier_threshold`](`Self::outlier_threshold`),
    /// in their original order.
    pub fn outliers(&self, listings: &[ListingRecord]) -> Vec<ListingRecord> {
        match self.outlier_threshold() {
            Some(threshold) => listings
                .iter()
                .filter(|l| l.cost < threshold)
                .copied()
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Everything reported for a single watched item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemReport {
    /// The name the item is watched under.
    pub name: String,
    pub item_id: u64,
    pub summary: ItemSummary,

    /// Every listing for the item, in the order the API returned them.
    pub listings: Vec<ListingRecord>,

    /// The listings priced more than one standard deviation below the average.
    pub outliers: Vec<ListingRecord>,

    /// Number of malformed listings dropped while reading the response.
    pub skipped: usize,
}

/// Groups the listings of `table` by item and summarizes each group.
///
/// One report is produced for every item that was fetched, including items with no
/// listings at all, in the order they were fetched.
///
/// # Errors
///
/// Returns [`Error::Lookup`](`crate::Error::Lookup`) if any item ID in the table does not
/// resolve to exactly one name on `watch_list`.
pub fn summarize(table: &ListingTable, watch_list: &WatchList) -> Result<Vec<ItemReport>> {
    let mut item_listings: HashMap<u64, Vec<ListingRecord>> = HashMap::new();

    for record in table.records() {
        item_listings
            .entry(record.item_id)
            .or_insert_with(Vec::new)
            .push(*record);
    }

    let mut reports = Vec::with_capacity(table.fetched_items().len());

    for &item_id in table.fetched_items() {
        let name = watch_list.name_for(item_id)?;
        let listings = item_listings.remove(&item_id).unwrap_or_default();
        let summary = ItemSummary::from_listings(&listings);
        let outliers = summary.outliers(&listings);

        debug!(
            "{} ({}): {} listings, {} outliers",
            name,
            item_id,
            listings.len(),
            outliers.len()
        );

        reports.push(ItemReport {
            name: name.to_string(),
            item_id,
            summary,
            listings,
            outliers,
            skipped: table.skipped_for(item_id),
        });
    }

    Ok(reports)
}
