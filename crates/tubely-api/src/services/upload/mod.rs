//! Upload pipeline stages shared by the thumbnail and video handlers.

pub mod publisher;
pub mod stager;

pub use publisher::{publish_asset, Publication};
pub use stager::{stage_upload, StagedUpload, UploadPolicy};
