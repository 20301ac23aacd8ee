//! Source tree discovery and destination housekeeping.

mod model;
mod prune;
mod scan;

pub use model::DiscoveredFile;
pub use prune::prune;
pub use scan::{destination_root, discover};
