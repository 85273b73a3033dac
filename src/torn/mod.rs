pub mod client;
pub mod market;
pub mod watchlist;

pub use client::{ListingSource, MarketClient};
pub use market::{FetchedListings, ListingRecord};
pub use watchlist::{WatchList, WatchedItem};
