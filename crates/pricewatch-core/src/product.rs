//! Product wire types for the tracker backend's `/api/products` endpoints.
//!
//! ## Observed shape from the backend
//!
//! ### Identity
//! `id` is assigned server-side when a product is first registered and is
//! stable for the product's lifetime. The list response is authoritative and
//! total: a product absent from it is no longer tracked.
//!
//! ### Prices
//! `current_price` is always present. `original_price` (the pre-discount
//! price the backend scraped at registration) may be omitted for products
//! registered before the backend started recording it; it defaults to `0`,
//! which also suppresses discount display.
//!
//! ### `price_history`
//! Chronological `{date, price}` points, appended server-side on each
//! recheck. An empty array is valid for freshly added products and means the
//! trend display is suppressed. The client never reorders or edits history;
//! it changes only through full list replacement.
//!
//! ### `ratings` / `purchases`
//! Best-effort scrape results; either may be absent or zero depending on what
//! the product page exposed. Both default to zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned product identifier.
///
/// Opaque to the client: used only for equality and as the key of per-product
/// recheck state. Never derived from list position.
pub type ProductId = i64;

/// A tracked product as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier, unique across the tracked set.
    pub id: ProductId,

    /// Canonical source URL the backend scrapes. Unique across the store;
    /// the client checks this best-effort before issuing a create request,
    /// the backend enforces it authoritatively.
    pub url: String,

    /// Display title scraped from the product page. May be empty.
    #[serde(default)]
    pub title: String,

    /// Display description. May be empty.
    #[serde(default)]
    pub description: String,

    /// Latest scraped price. Non-negative.
    pub current_price: f64,

    /// Pre-discount price recorded at registration. Absent from older
    /// records; defaults to `0`, which reads as "no discount known".
    #[serde(default)]
    pub original_price: f64,

    /// Rating score scraped from the page. Absent or zero when the page
    /// exposes none.
    #[serde(default)]
    pub ratings: f64,

    /// Purchase count scraped from the page. May be zero.
    #[serde(default)]
    pub purchases: i64,

    /// Chronological price points, append-only from the backend's
    /// perspective. Empty is valid and suppresses the trend display.
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

/// A single point in a product's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl Product {
    /// Returns `true` when the product has history to plot.
    ///
    /// The UI contract: the trend chart renders if and only if this is true.
    #[must_use]
    pub fn show_price_trend(&self) -> bool {
        !self.price_history.is_empty()
    }

    /// Returns the most recent history point's price, if any.
    #[must_use]
    pub fn latest_history_price(&self) -> Option<f64> {
        self.price_history.last().map(|p| p.price)
    }
}
