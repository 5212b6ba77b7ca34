//! The active search/price-bound constraint applied to the product list query.

use serde::{Deserialize, Serialize};

/// Ephemeral client-side filter state for the tracked-product list.
///
/// `None` bounds mean "no constraint". Clearing a bound removes the
/// constraint entirely; it is never encoded as `0` or NaN. Equality is used
/// by the tracker to recognize responses issued for a superseded filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Free-text search. Sent to the backend even when empty, matching the
    /// query contract of `GET /api/products`.
    pub search: String,

    /// Inclusive lower price bound, or no constraint.
    pub min_price: Option<f64>,

    /// Inclusive upper price bound, or no constraint.
    pub max_price: Option<f64>,
}

impl Filter {
    /// Returns `true` when no search text and no bounds are set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && self.min_price.is_none() && self.max_price.is_none()
    }
}
