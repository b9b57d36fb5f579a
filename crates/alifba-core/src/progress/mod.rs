pub mod store;
pub mod tracker;

pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use tracker::{ProgressMap, ProgressRecord, ProgressTracker, progress_percentage, visited_count};
