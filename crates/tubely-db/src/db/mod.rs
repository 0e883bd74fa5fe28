//! Database repositories for the data access layer
//
// Video records (owner + asset URLs)
pub mod video;
//
// Map-backed store for tests and local experiments
pub mod memory;

pub use memory::InMemoryVideoRepository;
pub use video::{VideoRepository, VideoStore};
