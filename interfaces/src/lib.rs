pub mod defs;

pub use defs::{ClassificationResult, Item, ItemId, ItemType, RejectionCause};
