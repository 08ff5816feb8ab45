use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::post_image::application::ports::outgoing::cloud_storage::{BlobStore, BlobStoreError};

/// google-cloud-storage addresses buckets as `projects/_/buckets/{bucket}`.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn map_write_error(msg: &str) -> BlobStoreError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        BlobStoreError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        BlobStoreError::BucketNotFound
    } else {
        BlobStoreError::Infrastructure(msg.to_string())
    }
}

/// Internal seam so the adapter can be tested without google-cloud-storage types.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), String> {
        self.0
            .write_object(bucket_resource, object_name, bytes, content_type)
            .await
    }
}

/// Production adapter for the `BlobStore` port.
#[derive(Clone)]
pub struct GcsBlobStore {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
}

impl Default for GcsBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GcsBlobStore {
    /// Client is initialized lazily on first use.
    pub fn new() -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
        }
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
        }
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), BlobStoreError> {
        let client = self
            .get_client()
            .await
            .map_err(|e| BlobStoreError::Infrastructure(e.to_string()))?;

        client
            .write_object(&bucket_resource(bucket), key, bytes, content_type)
            .await
            .map_err(|e| map_write_error(&e))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        tracing::info!("GCS storage client created");

        Ok(Self { storage })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), String> {
        self.storage
            .write_object(bucket_resource.to_string(), object_name.to_string(), bytes)
            .set_content_type(content_type.to_string())
            .send_buffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeGcsClient {
        last_write_call: Mutex<Option<(String, String, Bytes, String)>>,
        write_result: Mutex<Result<(), String>>,
    }

    impl Default for FakeGcsClient {
        fn default() -> Self {
            Self {
                last_write_call: Mutex::new(None),
                write_result: Mutex::new(Ok(())),
            }
        }
    }

    impl FakeGcsClient {
        fn new() -> Self {
            Self::default()
        }

        fn set_write_result(&self, r: Result<(), String>) {
            *self.write_result.lock().unwrap() = r;
        }
    }

    #[async_trait]
    impl GcsClient for FakeGcsClient {
        async fn write_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
            bytes: Bytes,
            content_type: &str,
        ) -> Result<(), String> {
            *self.last_write_call.lock().unwrap() = Some((
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes,
                content_type.to_string(),
            ));

            self.write_result.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_put_success_uses_bucket_resource_and_content_type() {
        let fake = Arc::new(FakeGcsClient::new());
        let store = GcsBlobStore::with_client(fake.clone());

        store
            .put(
                "post-images",
                "post-1/tok.png",
                Bytes::from_static(b"png-bytes"),
                "image/png",
            )
            .await
            .unwrap();

        let call = fake.last_write_call.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "projects/_/buckets/post-images");
        assert_eq!(call.1, "post-1/tok.png");
        assert_eq!(call.2, Bytes::from_static(b"png-bytes"));
        assert_eq!(call.3, "image/png");
    }

    #[tokio::test]
    async fn test_put_maps_access_denied() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.set_write_result(Err("Permission denied on object".to_string()));

        let store = GcsBlobStore::with_client(fake);
        let err = store
            .put("b", "k", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap_err();

        assert_eq!(err, BlobStoreError::AccessDenied);
    }

    #[tokio::test]
    async fn test_put_maps_bucket_not_found() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.set_write_result(Err("Bucket not found (404)".to_string()));

        let store = GcsBlobStore::with_client(fake);
        let err = store
            .put("b", "k", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap_err();

        assert_eq!(err, BlobStoreError::BucketNotFound);
    }

    #[tokio::test]
    async fn test_put_maps_other_errors_to_infrastructure() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.set_write_result(Err("connection reset by peer".to_string()));

        let store = GcsBlobStore::with_client(fake);
        let err = store
            .put("b", "k", Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BlobStoreError::Infrastructure("connection reset by peer".to_string())
        );
    }
}
