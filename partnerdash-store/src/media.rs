//! Media preparation before upload.
//!
//! Images are bounded, scaled down to fit a maximum frame and re-encoded as
//! JPEG. Videos are type-checked and passed through untouched.

use std::io::Cursor;

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use rand::Rng;

use crate::error::{Result, StoreError};
use crate::source::Bucket;

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Frame an image is scaled down to fit.
pub const MAX_WIDTH: u32 = 1920;
pub const MAX_HEIGHT: u32 = 1080;

/// JPEG quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 80;

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Size that fits `width x height` within the maximum frame, keeping aspect.
///
/// Width is constrained first, then height; both are rounded.
pub fn fit_within(width: u32, height: u32) -> (u32, u32) {
    let (mut w, mut h) = (f64::from(width), f64::from(height));

    if w > f64::from(MAX_WIDTH) {
        h = (h * f64::from(MAX_WIDTH) / w).round();
        w = f64::from(MAX_WIDTH);
    }
    if h > f64::from(MAX_HEIGHT) {
        w = (w * f64::from(MAX_HEIGHT) / h).round();
        h = f64::from(MAX_HEIGHT);
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Validate, downscale and re-encode an image as JPEG.
///
/// The file name is kept as given; the content type becomes `image/jpeg`.
pub fn prepare_image(upload: MediaUpload) -> Result<MediaUpload> {
    if !upload.content_type.starts_with("image/") {
        return Err(StoreError::media(format!(
            "{} is not an image ({})",
            upload.file_name, upload.content_type
        )));
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(StoreError::media(format!(
            "{} is {} bytes, limit is {}",
            upload.file_name,
            upload.bytes.len(),
            MAX_IMAGE_BYTES
        )));
    }

    let decoded = image::load_from_memory(&upload.bytes)?;
    let (width, height) = fit_within(decoded.width(), decoded.height());
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    resized.to_rgb8().write_with_encoder(encoder)?;

    tracing::debug!(
        file = %upload.file_name,
        original_bytes = upload.bytes.len(),
        encoded_bytes = out.get_ref().len(),
        width,
        height,
        "Prepared image"
    );

    Ok(MediaUpload {
        file_name: upload.file_name,
        content_type: "image/jpeg".to_string(),
        bytes: out.into_inner(),
    })
}

/// Validate a video upload.
pub fn prepare_video(upload: MediaUpload) -> Result<MediaUpload> {
    if !upload.content_type.starts_with("video/") {
        return Err(StoreError::media(format!(
            "{} is not a video ({})",
            upload.file_name, upload.content_type
        )));
    }
    Ok(upload)
}

/// Prepare an upload for the given bucket.
///
/// Image work runs on the blocking pool.
pub async fn prepare_for(bucket: Bucket, upload: MediaUpload) -> Result<MediaUpload> {
    match bucket {
        Bucket::Images => tokio::task::spawn_blocking(move || prepare_image(upload))
            .await
            .map_err(|e| StoreError::media(format!("image task failed: {e}")))?,
        Bucket::Videos => prepare_video(upload),
    }
}

/// Unique storage object name: random base-36 prefix, millisecond timestamp
/// and the original extension.
pub fn object_name(file_name: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::rng();
    let prefix: String = (0..11)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect();
    let millis = Utc::now().timestamp_millis();

    match extension(file_name) {
        Some(ext) => format!("{prefix}_{millis}.{ext}"),
        None => format!("{prefix}_{millis}"),
    }
}

/// Lower-cased extension of a file name, if any.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(800, 600), (800, 600));
        assert_eq!(fit_within(3840, 2160), (1920, 1080));
        // width first: 4000x1000 -> 1920x480
        assert_eq!(fit_within(4000, 1000), (1920, 480));
        // height only: 1000x4000 -> 270x1080
        assert_eq!(fit_within(1000, 4000), (270, 1080));
        // both: 3000x2000 -> 1920x1280 -> 1620x1080
        assert_eq!(fit_within(3000, 2000), (1620, 1080));
    }

    #[test]
    fn test_prepare_image_downscales_to_jpeg() {
        let upload = MediaUpload::new("poster.png", "image/png", png(2400, 1200));
        let prepared = prepare_image(upload).unwrap();

        assert_eq!(prepared.file_name, "poster.png");
        assert_eq!(prepared.content_type, "image/jpeg");
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1920, 960));
        assert_eq!(image::guess_format(&prepared.bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_prepare_image_keeps_small_dimensions() {
        let upload = MediaUpload::new("logo.png", "image/png", png(64, 32));
        let prepared = prepare_image(upload).unwrap();
        let decoded = image::load_from_memory(&prepared.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn test_prepare_image_rejects_wrong_type() {
        let upload = MediaUpload::new("clip.mp4", "video/mp4", vec![0; 16]);
        assert!(matches!(prepare_image(upload), Err(StoreError::Media(_))));
    }

    #[test]
    fn test_prepare_image_rejects_oversize() {
        let upload = MediaUpload::new("huge.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(prepare_image(upload), Err(StoreError::Media(_))));
    }

    #[test]
    fn test_prepare_image_rejects_garbage() {
        let upload = MediaUpload::new("broken.png", "image/png", vec![1, 2, 3]);
        assert!(prepare_image(upload).is_err());
    }

    #[test]
    fn test_prepare_video() {
        let ok = MediaUpload::new("clip.mp4", "video/mp4", vec![0; 16]);
        assert_eq!(prepare_video(ok.clone()).unwrap(), ok);

        let bad = MediaUpload::new("clip.png", "image/png", vec![0; 16]);
        assert!(prepare_video(bad).is_err());
    }

    #[test]
    fn test_object_name_shape() {
        let name = object_name("Summer Poster.PNG");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        let (prefix, millis) = stem.split_once('_').unwrap();

        assert_eq!(ext, "png");
        assert_eq!(prefix.len(), 11);
        assert!(prefix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(millis.parse::<i64>().is_ok());
        assert_ne!(object_name("a.jpg"), object_name("a.jpg"));
    }

    #[tokio::test]
    async fn test_prepare_for_routes_by_bucket() {
        let image = MediaUpload::new("a.png", "image/png", png(10, 10));
        let prepared = prepare_for(Bucket::Images, image).await.unwrap();
        assert_eq!(prepared.content_type, "image/jpeg");

        let video = MediaUpload::new("a.png", "image/png", png(10, 10));
        assert!(prepare_for(Bucket::Videos, video).await.is_err());
    }

    #[test]
    fn test_object_name_without_extension() {
        assert!(!object_name("README").contains('.'));
        assert_eq!(extension("archive.tar.GZ"), Some("gz".to_string()));
        assert_eq!(extension(".hidden"), None);
    }
}
