//! [`Imaging`] backed by the `image` crate.

use super::{find_content_bounds, Color, Imaging, ImagingError, OutputFormat, TrimBox};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{imageops, Rgb, RgbImage};

/// RGB raster imaging using the `image` crate codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterImaging;

impl Imaging for RasterImaging {
    type Image = RgbImage;

    fn blank(&self, width: u32, height: u32, background: Color) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(background))
    }

    fn dimensions(&self, image: &RgbImage) -> (u32, u32) {
        image.dimensions()
    }

    fn decode(&self, bytes: &[u8]) -> Result<RgbImage, ImagingError> {
        let img = image::load_from_memory(bytes).map_err(|e| ImagingError::Decode(e.to_string()))?;
        Ok(img.to_rgb8())
    }

    fn paste_opaque(&self, canvas: &mut RgbImage, tile: &RgbImage, x: u32, y: u32) {
        imageops::replace(canvas, tile, i64::from(x), i64::from(y));
    }

    fn find_content_bounds(
        &self,
        image: &RgbImage,
        background: Color,
        threshold: u8,
    ) -> Option<TrimBox> {
        find_content_bounds(image, background, threshold)
    }

    fn crop(&self, image: RgbImage, region: TrimBox) -> RgbImage {
        if region.is_full(image.width(), image.height()) {
            return image;
        }
        imageops::crop_imm(&image, region.left, region.top, region.width, region.height).to_image()
    }

    fn encode(&self, image: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, ImagingError> {
        let mut buffer = Vec::new();

        let result = match format {
            OutputFormat::Jpeg { quality } => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
                image.write_with_encoder(encoder)
            }
            OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buffer)),
        };
        result.map_err(|e| ImagingError::Encode(e.to_string()))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_background() {
        let image = RasterImaging.blank(4, 2, [10, 20, 30]);
        assert_eq!(image.dimensions(), (4, 2));
        assert!(image.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = RasterImaging.decode(b"not an image").unwrap_err();
        assert!(matches!(err, ImagingError::Decode(_)));
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let image = RgbImage::from_fn(8, 4, |x, y| Rgb([x as u8 * 30, y as u8 * 60, 7]));
        let bytes = RasterImaging.encode(&image, OutputFormat::Png).unwrap();
        let decoded = RasterImaging.decode(&bytes).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_jpeg_encode_produces_jpeg() {
        let image = RgbImage::from_pixel(16, 16, Rgb([120, 60, 30]));
        let bytes = RasterImaging
            .encode(&image, OutputFormat::Jpeg { quality: 90 })
            .unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_paste_clips_at_edge() {
        let mut canvas = RasterImaging.blank(4, 4, [0, 0, 0]);
        let tile = RgbImage::from_pixel(3, 3, Rgb([255, 0, 0]));

        RasterImaging.paste_opaque(&mut canvas, &tile, 2, 2);

        assert_eq!(canvas.get_pixel(3, 3).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_crop() {
        let image = RgbImage::from_fn(6, 6, |x, y| Rgb([x as u8, y as u8, 0]));
        let cropped = RasterImaging.crop(
            image,
            TrimBox {
                left: 2,
                top: 1,
                width: 3,
                height: 2,
            },
        );
        assert_eq!(cropped.dimensions(), (3, 2));
        assert_eq!(cropped.get_pixel(0, 0).0, [2, 1, 0]);
    }
}
