use std::path::PathBuf;
use std::process;

use tracing::{error, info, warn};

use tornwatch::config::Settings;
use tornwatch::parse::{self, report, ListingTable};
use tornwatch::torn::{MarketClient, WatchList};
use tornwatch::utils::telemetry::init_telemetry;
use tornwatch::{Error, ErrorKind};

fn main() {
    init_telemetry();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(exit_code(e.kind()));
    }
}

fn run() -> Result<(), Error> {
    let settings = Settings::from_env()?;
    let watch_list = load_watch_list(&settings)?;

    if watch_list.is_empty() {
        return Err(Error::Config("watch list is empty".to_string()));
    }
    watch_list.ensure_invertible()?;

    info!(
        "Watching {} items via {}",
        watch_list.len(),
        settings.base_url
    );

    let client = MarketClient::new(&settings)?;
    let table = ListingTable::collect(&client, &watch_list, settings.failure_policy)?;

    if table.total_skipped() > 0 {
        warn!("Skipped {} malformed listings", table.total_skipped());
    }
    if !table.failed_items().is_empty() {
        warn!(
            "{} items could not be fetched and are not in the report",
            table.failed_items().len()
        );
    }

    let reports = parse::summarize(&table, &watch_list)?;
    print!("{}", report::render(&reports));
    Ok(())
}

/// The watch list comes from the first argument, then `TORN_WATCH_LIST`, then the
/// built-in default.
fn load_watch_list(settings: &Settings) -> Result<WatchList, Error> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.watch_list_path.clone());

    match path {
        Some(path) => WatchList::from_path(path),
        None => WatchList::default_list(),
    }
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Config => 2,
        ErrorKind::Http => 3,
        ErrorKind::Data => 4,
        ErrorKind::Lookup => 5,
    }
}
