pub mod report;
pub mod summary;
pub mod table;

pub use summary::{summarize, ItemReport, ItemSummary};
pub use table::ListingTable;
