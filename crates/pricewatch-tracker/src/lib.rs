pub mod error;
pub mod recheck;
pub mod store;
pub mod tracker;

pub use error::TrackerError;
pub use recheck::{RecheckCoordinator, RecheckState};
pub use store::ProductStore;
pub use tracker::Tracker;
