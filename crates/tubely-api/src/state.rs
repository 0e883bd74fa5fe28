//! Application state shared by every handler.

use crate::auth::JwtService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoStore;
use tubely_processing::{MediaInspector, MediaNormalizer};
use tubely_storage::Storage;

/// Publication targets. Thumbnails and videos may live on different backends.
#[derive(Clone)]
pub struct StorageTargets {
    pub thumbnails: Arc<dyn Storage>,
    pub videos: Arc<dyn Storage>,
}

/// External media tools
#[derive(Clone)]
pub struct MediaTools {
    pub inspector: Arc<dyn MediaInspector>,
    pub normalizer: Arc<dyn MediaNormalizer>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    pub jwt: JwtService,
    pub storage: StorageTargets,
    pub media: MediaTools,
}
