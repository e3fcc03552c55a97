use crate::error::ChefCamError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use log::{debug, warn};
use serde::Deserialize;
use std::path::PathBuf;

const ACCEPTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// Represents where a dish photo comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(PathBuf),
    /// Raw image bytes, e.g. an upload body
    Bytes(Vec<u8>),
}

/// Limits applied to uploads before they are sent to a model
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Largest accepted input, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Longest side of the image sent to the model, in pixels
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// JPEG quality used when re-encoding (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_dimension() -> u32 {
    1024
}

fn default_jpeg_quality() -> u8 {
    80
}

/// An image ready to be embedded in a model request
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl PreparedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL form, as accepted by OpenAI-style image inputs
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }
}

/// Validate, downscale and re-encode a dish photo for upload.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The input is larger than `max_upload_bytes`
/// - The content is not JPEG, PNG, WebP or GIF
/// - Decoding or JPEG encoding fails
pub async fn prepare_image(
    source: &ImageSource,
    config: &ImageConfig,
) -> Result<PreparedImage, ChefCamError> {
    let data = match source {
        ImageSource::Path(path) => tokio::fs::read(path).await?,
        ImageSource::Bytes(bytes) => bytes.clone(),
    };

    if data.len() > config.max_upload_bytes {
        warn!(
            "Rejecting {} byte image (limit {})",
            data.len(),
            config.max_upload_bytes
        );
        return Err(ChefCamError::ImageTooLarge {
            size: data.len(),
            limit: config.max_upload_bytes,
        });
    }

    let format = detect_format(&data)?;
    let image = image::load_from_memory_with_format(&data, format)?;
    let image = downscale(image, config.max_dimension);

    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, config.jpeg_quality);
        encoder.encode_image(&rgb)?;
    }

    debug!(
        "Prepared {}x{} JPEG: {} bytes (input was {} bytes of {})",
        rgb.width(),
        rgb.height(),
        bytes.len(),
        data.len(),
        format.to_mime_type()
    );

    Ok(PreparedImage {
        bytes,
        media_type: ImageFormat::Jpeg.to_mime_type().to_string(),
    })
}

fn detect_format(data: &[u8]) -> Result<ImageFormat, ChefCamError> {
    let format = image::guess_format(data)
        .map_err(|_| ChefCamError::UnsupportedMediaType("unrecognized image data".to_string()))?;

    if ACCEPTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(ChefCamError::UnsupportedMediaType(
            format.to_mime_type().to_string(),
        ))
    }
}

/// Shrink so the longest side fits `max_dimension`; smaller images are left alone.
fn downscale(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return image;
    }
    image.resize(max_dimension, max_dimension, FilterType::Triangle)
}
