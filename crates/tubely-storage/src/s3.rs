use crate::keys::join_url;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::path::Path;
use tokio::fs;

/// S3 storage implementation
///
/// Credentials come from the standard AWS environment variables; bucket, region and
/// endpoint are passed explicitly.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    distribution_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region
    /// * `endpoint_url` - Optional custom endpoint (e.g., "http://localhost:9000" for MinIO)
    /// * `distribution_url` - Optional CDN base URL; public URLs use it instead of the bucket URL
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            distribution_url,
        })
    }
}

/// Public URL for an S3 object.
///
/// Precedence: distribution URL, then `{endpoint}/{bucket}/{key}` for S3-compatible
/// providers, then the virtual-hosted AWS form.
fn object_url(
    bucket: &str,
    region: &str,
    endpoint_url: Option<&str>,
    distribution_url: Option<&str>,
    key: &str,
) -> String {
    if let Some(distribution) = distribution_url {
        return join_url(distribution, key);
    }
    match endpoint_url {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_file(
        &self,
        storage_key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        let data = fs::read(source).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to read staged file {}: {}",
                source.display(),
                e
            ))
        })?;
        let size = data.len() as u64;
        let location = ObjectPath::from(storage_key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        object_url(
            &self.bucket,
            &self.region,
            self.endpoint_url.as_deref(),
            self.distribution_url.as_deref(),
            storage_key,
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_url_format() {
        assert_eq!(
            object_url("tubely-1", "us-east-2", None, None, "landscape/abc.mp4"),
            "https://tubely-1.s3.us-east-2.amazonaws.com/landscape/abc.mp4"
        );
    }

    #[test]
    fn test_custom_endpoint_uses_path_style() {
        assert_eq!(
            object_url(
                "tubely",
                "us-east-1",
                Some("http://localhost:9000/"),
                None,
                "other/abc.mp4"
            ),
            "http://localhost:9000/tubely/other/abc.mp4"
        );
    }

    #[test]
    fn test_distribution_url_wins() {
        assert_eq!(
            object_url(
                "tubely",
                "us-east-1",
                Some("http://localhost:9000"),
                Some("https://d1234.cloudfront.net/"),
                "portrait/abc.mp4"
            ),
            "https://d1234.cloudfront.net/portrait/abc.mp4"
        );
    }
}
