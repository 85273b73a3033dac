use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// The raw body returned by Torn's Market API for
/// `/market/{item_id}?selections=bazaar`.
///
/// While the resource can carry other selections (`itemmarket`, for example), the only
/// one requested and used by this library is `bazaar`, so the others are discarded.
///
/// Torn reports problems with the key itself (incorrect key, key paused, access level
/// too low) with a `200` status and an `error` object instead of the selection, so both
/// are optional here.
#[derive(Deserialize)]
struct MarketResponse {
    /// The bazaar listings, one element per seller offer.
    ///
    /// This is absent or `null` when nobody is selling the item. Elements are kept as
    /// raw JSON so that one malformed listing doesn't discard the whole response.
    #[serde(default)]
    bazaar: Option<Vec<Value>>,

    #[serde(default)]
    error: Option<ApiErrorPayload>,
}

/// The `error` object of a rejected API request.
#[derive(Deserialize)]
struct ApiErrorPayload {
    code: i64,
    error: String,
}

/// The fields of a single bazaar listing that this library reads. Torn also sends
/// an `ID` per listing, which is ignored.
#[derive(Deserialize)]
struct BazaarListing {
    cost: f64,
    quantity: u64,
}

/// A single observed bazaar listing: one seller offering `quantity` of an item at
/// `cost` dollars each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingRecord {
    /// The item the listing was fetched for.
    pub item_id: u64,

    /// The asking price per unit, in Torn dollars. Always finite and `>= 0`.
    pub cost: f64,

    /// The number of units available at that price.
    pub quantity: u64,
}

/// The listings extracted from one market response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedListings {
    /// Listings which were successfully read, in response order.
    pub records: Vec<ListingRecord>,

    /// Number of `bazaar` elements which were missing `cost` or `quantity`, had a
    /// negative, non-finite or non-numeric `cost`, or a `quantity` which isn't a
    /// non-negative integer.
    pub skipped: usize,
}

impl FetchedListings {
    /// Deserializes the body of a market response for `item_id`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tornwatch::torn::FetchedListings;
    ///
    /// let json = r#"
    ///   {
    ///     "bazaar": [
    ///       { "ID": 1, "cost": 845000, "quantity": 3 },
    ///       { "ID": 2, "cost": 849999, "quantity": 1 }
    ///     ]
    ///   }"#;
    /// let listings = FetchedListings::from_json(206, json).unwrap();
    /// assert_eq!(2, listings.records.len());
    /// assert_eq!(845000.0, listings.records[0].cost);
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Api`] - The body is an API error payload.
    /// * [`Error::Data`] - The body is not a JSON object, or `bazaar` is not an array.
    ///
    /// Individual malformed listings are not errors; they are counted in
    /// [`skipped`](`Self::skipped`).
    pub fn from_json(item_id: u64, s: &str) -> Result<Self> {
        let response: MarketResponse = serde_json::from_str(s).map_err(|e| Error::Data {
            item_id,
            reason: e.to_string(),
        })?;

        if let Some(err) = response.error {
            return Err(Error::Api {
                item_id,
                code: err.code,
                message: err.error,
            });
        }

        let mut listings = FetchedListings::default();

        for raw in response.bazaar.unwrap_or_default() {
            match BazaarListing::deserialize(&raw) {
                Ok(listing) if listing.cost.is_finite() && listing.cost >= 0.0 => {
                    listings.records.push(ListingRecord {
                        item_id,
                        cost: listing.cost,
                        quantity: listing.quantity,
                    })
                }
                Ok(listing) => {
                    warn!(
                        "Skipping listing for item {} with invalid cost {}",
                        item_id, listing.cost
                    );
                    listings.skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping malformed listing for item {}: {}", item_id, e);
                    listings.skipped += 1;
                }
            }
        }

        Ok(listings)
    }
}
