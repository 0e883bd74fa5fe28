//! Multipart staging: pick one form part, check its declared type, and stream it to a
//! temporary file bounded by a byte budget.

use crate::error::HttpAppError;
use axum::extract::Multipart;
use std::path::Path;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;
use tubely_processing::{matches_signature, SNIFF_LEN};

/// What a single upload endpoint accepts
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy<'a> {
    pub field_name: &'a str,
    /// Human label used in rejection messages ("thumbnail", "video upload")
    pub label: &'a str,
    pub allowed_content_types: &'a [String],
    pub max_bytes: usize,
    pub verify_magic_bytes: bool,
}

/// A form part written to disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    pub path: TempPath,
    /// Declared media type with parameters stripped, lowercased
    pub content_type: String,
    pub size: u64,
}

/// Normalize MIME type by stripping parameters (e.g. "image/png; charset=binary" -> "image/png").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate content type against allowlist. Compares the normalized MIME type only.
pub fn validate_content_type(
    content_type: Option<&str>,
    policy: &UploadPolicy<'_>,
) -> Result<String, AppError> {
    let normalized = content_type.map(normalize_mime_type).unwrap_or_default();
    if normalized.is_empty()
        || !policy
            .allowed_content_types
            .iter()
            .any(|ct| normalized == ct.to_lowercase())
    {
        return Err(AppError::BadRequest(format!(
            "Invalid file type for {}. Allowed types: {}",
            policy.label,
            policy.allowed_content_types.join(", ")
        )));
    }
    Ok(normalized)
}

fn too_large(policy: &UploadPolicy<'_>) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File exceeds maximum allowed size of {} MB",
        policy.max_bytes / 1024 / 1024
    ))
}

/// Stage the part named by `policy.field_name` into a new file under `temp_dir`.
///
/// The type check runs before any bytes are written. Other parts are skipped.
#[tracing::instrument(skip(multipart, policy), fields(field = policy.field_name))]
pub async fn stage_upload(
    multipart: &mut Multipart,
    policy: &UploadPolicy<'_>,
    temp_dir: &Path,
) -> Result<StagedUpload, HttpAppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(policy.field_name) {
            continue;
        }

        let content_type = validate_content_type(field.content_type(), policy)?;

        let (std_file, path) = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .tempfile_in(temp_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create staging file: {}", e)))?
            .into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        let mut size: usize = 0;
        let mut header: Vec<u8> = Vec::with_capacity(SNIFF_LEN);

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            if size > policy.max_bytes {
                return Err(too_large(policy).into());
            }
            if header.len() < SNIFF_LEN {
                let take = (SNIFF_LEN - header.len()).min(chunk.len());
                header.extend_from_slice(&chunk[..take]);
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to write staging file: {}", e)))?;
        }

        file.flush()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to flush staging file: {}", e)))?;
        drop(file);

        if policy.verify_magic_bytes && !matches_signature(&content_type, &header) {
            return Err(AppError::BadRequest(format!(
                "File content does not match declared type {}",
                content_type
            ))
            .into());
        }

        tracing::debug!(
            content_type = %content_type,
            size_bytes = size,
            path = %path.display(),
            "Upload staged"
        );

        return Ok(StagedUpload {
            path,
            content_type,
            size: size as u64,
        });
    }

    Err(AppError::BadRequest(format!(
        "Unable to parse form file: missing '{}' field",
        policy.field_name
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["image/jpg".to_string(), "image/png".to_string()]
    }

    fn policy(allowed: &[String]) -> UploadPolicy<'_> {
        UploadPolicy {
            field_name: "thumbnail",
            label: "thumbnail",
            allowed_content_types: allowed,
            max_bytes: 10 << 20,
            verify_magic_bytes: false,
        }
    }

    #[test]
    fn test_normalize_strips_parameters() {
        assert_eq!(normalize_mime_type("Image/PNG; charset=binary"), "image/png");
        assert_eq!(normalize_mime_type("video/mp4"), "video/mp4");
    }

    #[test]
    fn test_allowed_types_pass() {
        let allowed = allowed();
        let policy = policy(&allowed);
        assert_eq!(
            validate_content_type(Some("image/png"), &policy).unwrap(),
            "image/png"
        );
        assert_eq!(
            validate_content_type(Some("image/jpg; q=1"), &policy).unwrap(),
            "image/jpg"
        );
    }

    #[test]
    fn test_other_types_rejected() {
        let allowed = allowed();
        let policy = policy(&allowed);
        for ct in [Some("image/gif"), Some("image/jpeg"), Some(""), None] {
            assert!(
                matches!(
                    validate_content_type(ct, &policy),
                    Err(AppError::BadRequest(_))
                ),
                "{ct:?} should be rejected"
            );
        }
    }
}
