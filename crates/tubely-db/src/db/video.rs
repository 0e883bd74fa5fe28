use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tubely_core::{
    models::{NewVideo, Video},
    AppError,
};
use uuid::Uuid;

/// Record store for videos, keyed by video id.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert a new video owned by `new.user_id`
    async fn create_video(&self, new: NewVideo) -> Result<Video, AppError>;

    /// Fetch a video by id; `Ok(None)` when it does not exist
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Write every mutable field of `video` back; `Ok(None)` when the row is gone.
    ///
    /// The owner column is never written.
    async fn update_video(&self, video: &Video) -> Result<Option<Video>, AppError>;
}

const VIDEO_COLUMNS: &str =
    "id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id";

/// PostgreSQL-backed [`VideoStore`]
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, new: NewVideo) -> Result<Video, AppError> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        let video = sqlx::query_as::<Postgres, Video>(&query)
            .bind(Uuid::new_v4())
            .bind(now)
            .bind(now)
            .bind(&new.title)
            .bind(&new.description)
            .bind(new.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);

        let video = sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Option<Video>, AppError> {
        let query = format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        let updated = sqlx::query_as::<Postgres, Video>(&query)
            .bind(video.id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.thumbnail_url)
            .bind(&video.video_url)
            .bind(video.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }
}
