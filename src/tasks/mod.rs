//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: deletes expired links from both stores
//! - Cache-size guard: evicts least popular entries above capacity

mod guard;
mod scheduler;
mod sweeper;

pub use guard::spawn_cache_guard;
pub use scheduler::Scheduler;
pub use sweeper::spawn_expiration_sweeper;
