//! Tubely Media Processing Library
//!
//! Wraps the external ffprobe/ffmpeg tools behind the [`MediaInspector`] and
//! [`MediaNormalizer`] traits, plus magic-byte checks used by the upload stager.

pub mod command;
pub mod error;
pub mod faststart;
pub mod probe;
pub mod sniff;

// Re-export commonly used types
pub use error::{ProcessingError, ProcessingResult};
pub use faststart::{FfmpegNormalizer, MediaNormalizer};
pub use probe::{classify_ratio, parse_probe_output, FfprobeInspector, MediaInspector};
pub use sniff::{matches_signature, SNIFF_LEN};
