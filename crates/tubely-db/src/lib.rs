//! Tubely Database Library
//!
//! Persistence for video records. Handlers depend on the [`VideoStore`] trait only;
//! [`VideoRepository`] backs it with PostgreSQL and [`InMemoryVideoRepository`] with a map.

pub mod db;

pub use db::{InMemoryVideoRepository, VideoRepository, VideoStore};
