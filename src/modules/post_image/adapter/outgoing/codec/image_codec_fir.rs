use bytes::Bytes;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::io::Cursor;

use crate::post_image::application::{
    domain::entities::{DetectedMediaType, ImageDimensions, ThumbnailFormat},
    ports::outgoing::codec::{CodecError, ImageCodec},
};

fn image_format(format: ThumbnailFormat) -> ImageFormat {
    match format {
        ThumbnailFormat::Jpeg => ImageFormat::Jpeg,
        ThumbnailFormat::Png => ImageFormat::Png,
        ThumbnailFormat::Webp => ImageFormat::WebP,
        ThumbnailFormat::Gif => ImageFormat::Gif,
    }
}

/// `ImageCodec` backed by `image` for decode/encode and `fast_image_resize` for scaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirImageCodec;

impl FirImageCodec {
    pub fn new() -> Self {
        Self
    }

    fn to_fir_image(img: DynamicImage) -> Result<Image<'static>, CodecError> {
        let (w, h) = (img.width(), img.height());

        // Keep alpha only when the source has it
        let (raw, pixel_type) = match img {
            DynamicImage::ImageRgb8(rgb) => (rgb.into_raw(), PixelType::U8x3),
            DynamicImage::ImageRgba8(rgba) => (rgba.into_raw(), PixelType::U8x4),
            other if other.color().has_alpha() => (other.to_rgba8().into_raw(), PixelType::U8x4),
            other => (other.to_rgb8().into_raw(), PixelType::U8x3),
        };

        Image::from_vec_u8(w, h, raw, pixel_type)
            .map_err(|e| CodecError::Resize(format!("Failed to create image: {}", e)))
    }

    fn to_dynamic_image(dst: Image<'static>) -> Result<DynamicImage, CodecError> {
        let (w, h) = (dst.width(), dst.height());
        let pixel_type = dst.pixel_type();
        let raw = dst.into_vec();

        let img = match pixel_type {
            PixelType::U8x4 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
            _ => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        };

        img.ok_or_else(|| CodecError::Resize("Resized buffer has unexpected size".to_string()))
    }

    fn encode(img: DynamicImage, format: ThumbnailFormat) -> Result<Bytes, CodecError> {
        // JPEG has no alpha channel
        let img = match format {
            ThumbnailFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
            _ => img,
        };

        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image_format(format))
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(Bytes::from(out.into_inner()))
    }
}

impl ImageCodec for FirImageCodec {
    fn detect_type(&self, bytes: &[u8]) -> Option<DetectedMediaType> {
        let format = image::guess_format(bytes).ok()?;
        let extension = format.extensions_str().first()?;

        Some(DetectedMediaType::new(*extension, format.to_mime_type()))
    }

    fn decode_dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, CodecError> {
        let (width, height) = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(format!("Failed to guess format: {}", e)))?
            .into_dimensions()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        ImageDimensions::try_new(width, height).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        format: ThumbnailFormat,
    ) -> Result<Bytes, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidTarget { width, height });
        }

        let img = image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
        let src = Self::to_fir_image(img)?;
        let mut dst = Image::new(width, height, src.pixel_type());

        Resizer::new()
            .resize(
                &src,
                &mut dst,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            )
            .map_err(|e| CodecError::Resize(e.to_string()))?;

        Self::encode(Self::to_dynamic_image(dst)?, format)
    }
}
