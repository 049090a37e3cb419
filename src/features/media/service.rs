use crate::features::media::pipeline::{
    self, decode_inline_image, encode_inline_jpeg, is_inline_image, DEFAULT_MAX_SIZE_MB,
    DEFAULT_TARGET_KB,
};
use crate::features::media::storage_client::StorageClient;
use crate::utils::error::{Error, Result};

/// Validate, compress and upload in one pass. Owned by the auth and admin
/// workflows; they decide how hard a failure here may hit the caller.
#[derive(Clone)]
pub struct ImagePipeline {
    storage: Option<StorageClient>,
}

impl ImagePipeline {
    pub fn new(storage: Option<StorageClient>) -> Self {
        Self { storage }
    }

    pub fn disabled() -> Self {
        Self { storage: None }
    }

    /// Turn an inline-submitted image into the best representation we can
    /// persist: a public URL when the upload succeeds, otherwise the
    /// compressed inline value. Validation failures propagate.
    pub async fn process_inline(&self, inline: &str, owner_id: &str) -> Result<String> {
        self.process_indexed(inline, owner_id, None).await
    }

    /// Multi-photo variant of `process_inline`. Non-inline entries pass
    /// through untouched; uploads carry their batch position in the object
    /// key.
    pub async fn process_inline_many(
        &self,
        values: &[String],
        owner_id: &str,
    ) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            out.push(self.process_indexed(value, owner_id, Some(index)).await?);
        }
        Ok(out)
    }

    async fn process_indexed(
        &self,
        inline: &str,
        owner_id: &str,
        index: Option<usize>,
    ) -> Result<String> {
        if !is_inline_image(inline) {
            // already a URL, nothing to do
            return Ok(inline.to_string());
        }

        let bytes = decode_inline_image(inline)?;
        pipeline::validate(&bytes, DEFAULT_MAX_SIZE_MB)?;
        let compressed = pipeline::compress(&bytes, DEFAULT_TARGET_KB)?;

        match &self.storage {
            Some(storage) => {
                match storage.upload(compressed.data.clone(), owner_id, index).await {
                    Ok(url) => Ok(url),
                    Err(Error::UploadFailed(msg)) => {
                        tracing::warn!(
                            owner_id,
                            error = %msg,
                            "image upload failed, keeping compressed inline image"
                        );
                        Ok(encode_inline_jpeg(&compressed.data))
                    }
                    Err(other) => Err(other),
                }
            }
            None => Ok(encode_inline_jpeg(&compressed.data)),
        }
    }
}
