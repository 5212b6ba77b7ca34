use thiserror::Error;

use pricewatch_client::ClientError;
use pricewatch_core::ProductId;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// User input rejected before any network call. The message is shown to
    /// the user verbatim.
    #[error("{message}")]
    Validation { message: String },

    /// A backend call failed. Surfaced to the user as a generic message
    /// unless the backend supplied a rejection message.
    #[error("backend request failed: {0}")]
    Backend(#[from] ClientError),

    /// A recheck was requested for an id not present in the store.
    #[error("unknown product id {id}")]
    UnknownProduct { id: ProductId },
}
