use chrono::Utc;

use crate::config::StorageSettings;
use crate::utils::error::{Error, Result};

/// Client for the public object-storage bucket. Objects are written under a
/// `profiles/` prefix and served back through the public URL.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    public_url: String,
    bucket: String,
}

impl StorageClient {
    /// Returns `None` when the storage endpoints are not configured; uploads
    /// are then disabled and images stay inline.
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        let base_url = settings.storage_base_url.clone()?;
        let public_url = settings
            .storage_public_url
            .clone()
            .unwrap_or_else(|| base_url.clone());

        Some(Self {
            http: reqwest::Client::new(),
            base_url,
            public_url,
            bucket: settings.storage_bucket.clone(),
        })
    }

    fn object_key(owner_id: &str, index: Option<usize>) -> String {
        let timestamp = Utc::now().timestamp_millis();
        match index {
            Some(i) => format!("profiles/{owner_id}-{timestamp}-{i}.jpg"),
            None => format!("profiles/{owner_id}-{timestamp}.jpg"),
        }
    }

    async fn put_object(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        let url = format!("{}/{}/{}", self.base_url, self.bucket, key);

        let res = self
            .http
            .put(&url)
            .header("content-type", "image/jpeg")
            .header("cache-control", "max-age=3600")
            .body(bytes)
            .send()
            .await?;

        if res.status().is_success() {
            Ok(format!("{}/{}/{}", self.public_url, self.bucket, key))
        } else {
            let code = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(Error::UploadFailed(format!("status={code} body={body}")))
        }
    }

    /// Upload one image, returning its public URL. Multi-photo batches pass
    /// their position so same-millisecond keys cannot collide.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        owner_id: &str,
        index: Option<usize>,
    ) -> Result<String> {
        let key = Self::object_key(owner_id, index);
        self.put_object(&key, bytes).await
    }
}
