//! Content bounding box detection.
//!
//! A pixel counts as content when any channel differs from the background by
//! more than the threshold. The tile server pads the sphere projection with
//! near-black borders, so a small threshold also swallows JPEG noise in that
//! padding.

use super::Color;
use image::RgbImage;
use std::fmt;

/// Crop rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrimBox {
    /// Left edge
    pub left: u32,
    /// Top edge
    pub top: u32,
    /// Width of the box
    pub width: u32,
    /// Height of the box
    pub height: u32,
}

impl TrimBox {
    /// Box covering a whole `width × height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    /// Returns true if the box covers all of a `width × height` image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

impl fmt::Display for TrimBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Returns true if `pixel` differs from `background` by more than `threshold`.
#[inline]
fn is_content(pixel: &[u8; 3], background: &Color, threshold: u8) -> bool {
    pixel
        .iter()
        .zip(background)
        .any(|(&p, &b)| p.abs_diff(b) > threshold)
}

/// Finds the smallest box enclosing all content pixels.
///
/// Returns `None` when every pixel is within `threshold` of `background`.
pub fn find_content_bounds(image: &RgbImage, background: Color, threshold: u8) -> Option<TrimBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (y, row) in image.enumerate_rows() {
        for (x, _, pixel) in row {
            if is_content(&pixel.0, &background, threshold) {
                found = true;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    found.then(|| TrimBox {
        left: min_x,
        top: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const BG: Color = [0, 0, 0];

    #[test]
    fn test_all_background_has_no_bounds() {
        let image = RgbImage::new(16, 8);
        assert_eq!(find_content_bounds(&image, BG, 6), None);
    }

    #[test]
    fn test_noise_under_threshold_ignored() {
        let image = RgbImage::from_pixel(16, 8, Rgb([6, 3, 6]));
        assert_eq!(find_content_bounds(&image, BG, 6), None);
    }

    #[test]
    fn test_single_channel_over_threshold_counts() {
        let mut image = RgbImage::new(16, 8);
        image.put_pixel(5, 2, Rgb([0, 7, 0]));

        assert_eq!(
            find_content_bounds(&image, BG, 6),
            Some(TrimBox {
                left: 5,
                top: 2,
                width: 1,
                height: 1
            })
        );
    }

    #[test]
    fn test_bounds_enclose_all_content() {
        let mut image = RgbImage::new(20, 10);
        image.put_pixel(3, 7, Rgb([200, 0, 0]));
        image.put_pixel(12, 1, Rgb([0, 0, 200]));

        let bounds = find_content_bounds(&image, BG, 6).unwrap();
        assert_eq!(
            bounds,
            TrimBox {
                left: 3,
                top: 1,
                width: 10,
                height: 7
            }
        );
        assert_eq!(bounds.to_string(), "10x7+3+1");
    }

    #[test]
    fn test_non_black_background() {
        let mut image = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
        image.put_pixel(4, 4, Rgb([0, 0, 0]));

        let bounds = find_content_bounds(&image, [255, 255, 255], 6).unwrap();
        assert_eq!((bounds.left, bounds.top), (4, 4));
    }

    #[test]
    fn test_full_box() {
        let full = TrimBox::full(4, 2);
        assert!(full.is_full(4, 2));
        assert!(!full.is_full(4, 3));
    }
}
