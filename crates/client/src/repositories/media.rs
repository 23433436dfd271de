//! Photo uploads.

use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;

use crate::infrastructure::ports::{MediaStorePort, RandomPort, UploadError};

/// JPEG quality used for every uploaded photo (0-100).
pub const JPEG_QUALITY: u8 = 50;

const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Uploads photos as compressed JPEGs under fresh names.
///
/// Every successful call leaves a blob behind. Nothing here deletes blobs, so
/// a photo uploaded for a location that then fails to save stays in storage.
pub struct MediaStore {
    port: Arc<dyn MediaStorePort>,
    random: Arc<dyn RandomPort>,
    bucket: String,
}

impl MediaStore {
    pub fn new(
        port: Arc<dyn MediaStorePort>,
        random: Arc<dyn RandomPort>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            port,
            random,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Compress `image` (PNG, JPEG or WebP bytes) and upload it.
    ///
    /// Returns the public URL of the stored object.
    pub async fn upload_image(&self, image: &[u8]) -> Result<String, UploadError> {
        let jpeg = encode_jpeg(image, JPEG_QUALITY)?;
        let name = format!("{}.jpg", self.random.gen_uuid().to_string().to_uppercase());
        let size = jpeg.len();

        self.port
            .put_object(&self.bucket, &name, jpeg, JPEG_CONTENT_TYPE)
            .await?;

        tracing::info!(bucket = %self.bucket, name = %name, size, "Photo uploaded");
        Ok(self.port.public_url(&self.bucket, &name))
    }
}

/// Decode any supported image and re-encode it as JPEG.
///
/// Alpha is dropped since JPEG has no alpha channel.
pub fn encode_jpeg(image: &[u8], quality: u8) -> Result<Vec<u8>, UploadError> {
    let decoded = image::load_from_memory(image).map_err(UploadError::encode)?;
    let rgb = decoded.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&rgb)
        .map_err(UploadError::encode)?;
    Ok(out)
}
