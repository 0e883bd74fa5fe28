//! Tubely API Library
//!
//! HTTP handlers, authentication, the upload pipeline and application setup. The binary
//! in `main.rs` wires these together; integration tests build the router directly.

mod api_doc;
mod handlers;
mod services;
mod telemetry;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::thumbnail_upload::THUMBNAIL_FIELD;
pub use handlers::video_upload::VIDEO_FIELD;
pub use telemetry::init_telemetry;
