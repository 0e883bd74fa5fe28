//! Map-backed [`VideoStore`] used by tests and database-less runs.

use super::video::VideoStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tubely_core::{
    models::{NewVideo, Video},
    AppError,
};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record as-is
    pub fn insert(&self, video: Video) {
        if let Ok(mut guard) = self.videos.write() {
            guard.insert(video.id, video);
        }
    }

    pub fn remove(&self, id: Uuid) -> Option<Video> {
        self.videos.write().ok().and_then(|mut guard| guard.remove(&id))
    }

    fn poisoned() -> AppError {
        AppError::Internal("video store lock poisoned".to_string())
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoRepository {
    async fn create_video(&self, new: NewVideo) -> Result<Video, AppError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: new.title,
            description: new.description,
            thumbnail_url: None,
            video_url: None,
            user_id: new.user_id,
        };
        self.videos
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(video.id, video.clone());
        Ok(video)
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self
            .videos
            .read()
            .map_err(|_| Self::poisoned())?
            .get(&id)
            .cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<Option<Video>, AppError> {
        let mut guard = self.videos.write().map_err(|_| Self::poisoned())?;
        match guard.get_mut(&video.id) {
            Some(stored) => {
                let owner = stored.user_id;
                *stored = video.clone();
                stored.user_id = owner;
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }
}
