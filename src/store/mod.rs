//! Record storage for devices, posts, schedule templates and holidays.
//!
//! The engine itself is pure; this module keeps the records it reads
//! between HTTP requests.

mod memory;

pub use memory::MemoryStore;
