use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::utils::error::{Error, Result};

pub const DEFAULT_TARGET_KB: u64 = 500;
pub const DEFAULT_MAX_SIZE_MB: u64 = 20;
/// Lowest JPEG quality the progressive re-encode will reach.
pub const QUALITY_FLOOR: u8 = 30;
const QUALITY_STEP: u8 = 10;

#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub size: usize,
    pub original_size: usize,
}

/// Reject non-image bytes and oversized files before any decoding work.
pub fn validate(bytes: &[u8], max_size_mb: u64) -> Result<()> {
    if image::guess_format(bytes).is_err() {
        return Err(Error::InvalidFileType);
    }

    let max_bytes = max_size_mb * 1024 * 1024;
    if bytes.len() as u64 > max_bytes {
        return Err(Error::FileTooLarge {
            size_bytes: bytes.len() as u64,
            max_bytes,
        });
    }

    Ok(())
}

/// Dimension bound and starting quality depend on how heavy the source is:
/// bigger files get downscaled harder and start from a lower quality.
fn compression_params(source_bytes: usize) -> (u32, u8) {
    let size_mb = source_bytes as f64 / (1024.0 * 1024.0);
    if size_mb > 3.0 {
        (1200, 60)
    } else if size_mb > 1.0 {
        (1000, 70)
    } else {
        (1200, 80)
    }
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| Error::Infrastructure(format!("jpeg encode failed: {e}")))?;
    Ok(out)
}

/// Downscale and progressively re-encode until the payload fits under
/// `target_kb` or the quality floor is reached. Deterministic for a given
/// input. When the source already fits the dimension bound and no candidate
/// encoding beats its byte size, the source is returned unchanged, so
/// compressing an already-compressed image never grows it.
pub fn compress(bytes: &[u8], target_kb: u64) -> Result<CompressedImage> {
    let original_size = bytes.len();
    let image = image::load_from_memory(bytes).map_err(|_| Error::InvalidFileType)?;

    let (max_dim, start_quality) = compression_params(original_size);
    let needs_resize = image.width() > max_dim || image.height() > max_dim;
    let resized = if needs_resize {
        image.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        image
    };

    let target_bytes = (target_kb * 1024) as usize;
    let mut quality = start_quality;
    let mut encoded = encode_jpeg(&resized, quality)?;

    while encoded.len() > target_bytes && quality > QUALITY_FLOOR {
        quality = quality.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR);
        encoded = encode_jpeg(&resized, quality)?;
    }

    if !needs_resize && encoded.len() >= original_size {
        return Ok(CompressedImage {
            data: bytes.to_vec(),
            size: original_size,
            original_size,
        });
    }

    Ok(CompressedImage {
        size: encoded.len(),
        data: encoded,
        original_size,
    })
}

pub fn is_inline_image(value: &str) -> bool {
    value.starts_with("data:image/")
}

/// Decode a `data:image/...;base64,` URL into raw bytes.
pub fn decode_inline_image(value: &str) -> Result<Vec<u8>> {
    let encoded = value
        .split_once(";base64,")
        .map(|(_, rest)| rest)
        .ok_or(Error::InvalidFileType)?;
    BASE64.decode(encoded).map_err(|_| Error::InvalidFileType)
}

pub fn encode_inline_jpeg(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}
