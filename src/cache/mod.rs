//! Cache Module
//!
//! Provides the bounded popularity cache that fronts the durable link store.

mod entry;
mod ranking;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use ranking::RankingIndex;
pub use stats::CacheStats;
pub use store::PopularityCache;
