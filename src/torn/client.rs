use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::torn::market::FetchedListings;

/// Anything that can produce the current bazaar listings for an item.
pub trait ListingSource {
    fn fetch(&self, item_id: u64) -> Result<FetchedListings>;
}

/// Blocking client for Torn's Market API.
///
/// Each call to [`fetch`](`ListingSource::fetch`) issues exactly one request. There is
/// no caching, and failed requests are not retried.
pub struct MarketClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl MarketClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(MarketClient {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            client,
        })
    }

    fn market_url(&self, item_id: u64) -> String {
        format!("{}/market/{}", self.base_url, item_id)
    }
}

impl ListingSource for MarketClient {
    fn fetch(&self, item_id: u64) -> Result<FetchedListings> {
        let url = self.market_url(item_id);
        debug!("Fetching bazaar listings for item {} from {}", item_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("selections", "bazaar"), ("key", self.api_key.as_str())])
            .send()
            .map_err(|e| Error::transport(item_id, e))?;

        check_status(item_id, response.status())?;

        let body = response.text().map_err(|e| Error::transport(item_id, e))?;
        let listings = FetchedListings::from_json(item_id, &body)?;

        debug!(
            "Item {}: {} listings, {} skipped",
            item_id,
            listings.records.len(),
            listings.skipped
        );
        Ok(listings)
    }
}

/// Maps a non-success status code to [`Error::Http`].
fn check_status(item_id: u64, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Http { item_id, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::FailurePolicy;

    fn settings(base_url: &str) -> Settings {
        Settings {
            api_key: "secret".to_string(),
            base_url: base_url.to_string(),
            request_timeout: Duration::from_millis(500),
            failure_policy: FailurePolicy::Abort,
            watch_list_path: None,
        }
    }

    #[test]
    fn market_url_has_no_key() {
        let client = MarketClient::new(&settings("https://api.torn.com")).unwrap();
        let url = client.market_url(206);
        assert_eq!("https://api.torn.com/market/206", url);
        assert!(!url.contains("secret"));
    }

    #[test]
    fn success_statuses_pass() {
        assert!(check_status(206, StatusCode::OK).is_ok());
        assert!(check_status(206, StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn failure_statuses_are_http_errors() {
        for status in &[StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            match check_status(206, *status) {
                Err(Error::Http { item_id, status: s }) => {
                    assert_eq!(206, item_id);
                    assert_eq!(*status, s);
                }
                _ => panic!("expected an HTTP error for {}", status),
            }
        }
    }

    #[test]
    fn transport_error_drops_url_and_key() {
        // reqwest rejects the scheme before opening any connection, and the error it
        // returns still carries the full request URL.
        let source = reqwest::blocking::Client::new()
            .get("ftp://127.0.0.1/market/206?selections=bazaar&key=secret")
            .send()
            .unwrap_err();
        assert!(source.url().is_some());

        let err = Error::transport(206, source);

        assert_eq!(crate::ErrorKind::Http, err.kind());
        match &err {
            Error::Transport { item_id, source } => {
                assert_eq!(206, *item_id);
                assert!(source.url().is_none());
            }
            _ => panic!("expected a transport error"),
        }
        assert!(!err.to_string().contains("secret"));
        assert!(!format!("{:?}", err).contains("secret"));
    }
}
