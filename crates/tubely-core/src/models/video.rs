use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record. The owner (`user_id`) is fixed at creation; the upload pipeline
/// only ever changes one of the two asset URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl Video {
    /// Set the URL field that corresponds to `kind`, leaving the other untouched.
    pub fn set_asset_url(&mut self, kind: AssetKind, url: String) {
        match kind {
            AssetKind::Thumbnail => self.thumbnail_url = Some(url),
            AssetKind::Video => self.video_url = Some(url),
        }
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Parameters for creating a video record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

/// Which asset field of a [`Video`] an upload targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Thumbnail,
    Video,
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetKind::Thumbnail => write!(f, "thumbnail"),
            AssetKind::Video => write!(f, "video"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Video {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: "Boots".to_string(),
            description: "A pair of boots".to_string(),
            thumbnail_url: None,
            video_url: Some("https://cdn.example.com/landscape/abc.mp4".to_string()),
            user_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn setting_thumbnail_keeps_video_url() {
        let mut v = video();
        v.set_asset_url(AssetKind::Thumbnail, "http://localhost/assets/k.png".to_string());
        assert_eq!(v.thumbnail_url.as_deref(), Some("http://localhost/assets/k.png"));
        assert_eq!(
            v.video_url.as_deref(),
            Some("https://cdn.example.com/landscape/abc.mp4")
        );
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let json = serde_json::to_value(video()).unwrap();
        assert!(json.get("thumbnail_url").is_some());
        assert!(json.get("user_id").is_some());
    }
}
