use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::FailurePolicy;
use crate::error::Result;
use crate::torn::{FetchedListings, ListingRecord, ListingSource, WatchList};

/// Every listing observed during one run, across all watched items.
///
/// The table is only appended to while fetching. Once [`collect`](`Self::collect`)
/// returns, it is handed to [`summarize`](`crate::parse::summarize`) and only read.
#[derive(Debug, Default)]
pub struct ListingTable {
    records: Vec<ListingRecord>,

    /// Items which were fetched successfully, in fetch order.
    fetched: Vec<u64>,

    /// Malformed listings skipped per item.
    skipped: HashMap<u64, usize>,

    /// Items which failed and were left out under [`FailurePolicy::SkipItem`].
    failed: Vec<u64>,
}

impl ListingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches every item on the watch list, one at a time, in watch list order.
    ///
    /// With [`FailurePolicy::Abort`], the first failed fetch is returned as the error and
    /// nothing is collected. With [`FailurePolicy::SkipItem`], the failure is logged and
    /// the item is left out of the table.
    pub fn collect<S: ListingSource>(
        source: &S,
        watch_list: &WatchList,
        policy: FailurePolicy,
    ) -> Result<Self> {
        let mut table = ListingTable::new();

        for item_id in watch_list.item_ids() {
            match source.fetch(item_id) {
                Ok(listings) => table.push(item_id, listings),
                Err(e) if policy == FailurePolicy::SkipItem => {
                    warn!("Leaving item {} out of the report: {}", item_id, e);
                    table.failed.push(item_id);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Collected {} listings for {} items",
            table.records.len(),
            table.fetched.len()
        );
        Ok(table)
    }

    /// Appends the listings of one successful fetch.
    ///
    /// Records are expected to be tagged with `item_id` already, as
    /// [`FetchedListings::from_json`] does.
    pub fn push(&mut self, item_id: u64, listings: FetchedListings) {
        if listings.skipped > 0 {
            *(self.skipped.entry(item_id).or_insert(0)) += listings.skipped;
        }
        if !self.fetched.contains(&item_id) {
            self.fetched.push(item_id);
        }
        self.records.extend(listings.records);
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn fetched_items(&self) -> &[u64] {
        &self.fetched
    }

    pub fn failed_items(&self) -> &[u64] {
        &self.failed
    }

    pub fn skipped_for(&self, item_id: u64) -> usize {
        self.skipped.get(&item_id).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}
