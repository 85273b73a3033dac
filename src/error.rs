use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while loading configuration, fetching listings, or building a report.
#[derive(Error, Debug)]
pub enum Error {
    /// A required setting is missing or a setting could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The watch list could not be read or parsed.
    #[error("invalid watch list: {0}")]
    WatchList(#[from] csv::Error),

    /// The market API answered with a non-success status code.
    #[error("market request for item {item_id} failed with HTTP {status}")]
    Http { item_id: u64, status: StatusCode },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    ///
    /// The request URL carries the API key, so it is stripped from `source`
    /// before this variant is built.
    #[error("market request for item {item_id} could not be sent: {source}")]
    Transport {
        item_id: u64,
        #[source]
        source: reqwest::Error,
    },

    /// The market API answered `200` with an error payload, typically an invalid key.
    #[error("market API rejected the request for item {item_id}: {message} (code {code})")]
    Api {
        item_id: u64,
        code: i64,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed market response for item {item_id}: {reason}")]
    Data { item_id: u64, reason: String },

    /// An item ID could not be resolved back to exactly one watched item name.
    #[error("{}", lookup_message(.item_id, .names))]
    Lookup { item_id: u64, names: Vec<String> },
}

/// Coarse classification of an [`Error`], used by the binary to pick an exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Http,
    Data,
    Lookup,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::WatchList(_) => ErrorKind::Config,
            Error::Http { .. } | Error::Transport { .. } | Error::Api { .. } => ErrorKind::Http,
            Error::Data { .. } => ErrorKind::Data,
            Error::Lookup { .. } => ErrorKind::Lookup,
        }
    }

    /// Builds a [`Error::Transport`] with the request URL removed.
    pub(crate) fn transport(item_id: u64, source: reqwest::Error) -> Self {
        Error::Transport {
            item_id,
            source: source.without_url(),
        }
    }
}

fn lookup_message(item_id: &u64, names: &[String]) -> String {
    if names.is_empty() {
        format!("item {} is not on the watch list", item_id)
    } else {
        format!(
            "item {} is watched under more than one name: {}",
            item_id,
            names.join(", ")
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
