use image::{GrayImage, Luma, Rgb};
use imageproc::contrast::{otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;
use logging_timer::time;

pub const WHITE: Luma<u8> = Luma([u8::MAX]);
pub const BLACK: Luma<u8> = Luma([u8::MIN]);

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const RAINBOW: [Rgb<u8>; 7] = [
    Rgb([255, 0, 0]),
    Rgb([255, 127, 0]),
    Rgb([255, 255, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([75, 0, 130]),
    Rgb([143, 0, 255]),
];

/// A binary ink raster with the same dimensions as the scanned sheet.
/// Nonzero pixels are ink; produced once per sheet and read-only after that.
#[derive(Debug, Clone)]
pub struct InkMask {
    pixels: GrayImage,
}

impl InkMask {
    pub fn new(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn image(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        *self.pixels.get_pixel(x, y) != BLACK
    }

    /// Number of ink pixels within `rect`. The rect must lie within the mask.
    pub fn ink_count_in(&self, rect: &Rect) -> u32 {
        let mut count = 0;
        for y in rect.top()..rect.top() + rect.height() as i32 {
            for x in rect.left()..rect.left() + rect.width() as i32 {
                if self.is_ink(x as u32, y as u32) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Fraction of `rect` covered in ink, in [0, 1].
    pub fn coverage_in(&self, rect: &Rect) -> f32 {
        let area = rect.width() * rect.height();
        if area == 0 {
            return 0.0;
        }
        self.ink_count_in(rect) as f32 / area as f32
    }
}

#[time]
/// Turn a grayscale scan into an ink mask: Gaussian smoothing to knock down
/// scan speckle, then an Otsu-selected global threshold so varying scan
/// brightness needs no manual tuning, inverted so ink is the foreground.
pub fn binarize(img: &GrayImage, blur_sigma: f32) -> InkMask {
    let blurred = gaussian_blur_f32(img, blur_sigma);
    let level = otsu_level(&blurred);
    let mut mask = threshold(&blurred, level);
    image::imageops::invert(&mut mask);
    InkMask::new(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binarize_marks_dark_pixels_as_ink() {
        let mut img = GrayImage::from_pixel(40, 20, Luma([240]));
        for y in 0..20 {
            for x in 0..20 {
                img.put_pixel(x, y, Luma([10]));
            }
        }

        let mask = binarize(&img, 1.0);
        assert_eq!((40, 20), mask.dimensions());
        // interior pixels, away from the blurred boundary
        assert!(mask.is_ink(5, 10));
        assert_eq!(&WHITE, mask.image().get_pixel(5, 10));
        assert!(!mask.is_ink(35, 10));
    }

    #[test]
    fn coverage_counts_ink_within_rect() {
        let mut pixels = GrayImage::from_pixel(10, 10, Luma([0]));
        for y in 0..5 {
            for x in 0..10 {
                pixels.put_pixel(x, y, Luma([255]));
            }
        }
        let mask = InkMask::new(pixels);

        assert_eq!(50, mask.ink_count_in(&Rect::at(0, 0).of_size(10, 10)));
        assert_eq!(0.5, mask.coverage_in(&Rect::at(0, 0).of_size(10, 10)));
        assert_eq!(1.0, mask.coverage_in(&Rect::at(0, 0).of_size(10, 5)));
        assert_eq!(0.0, mask.coverage_in(&Rect::at(0, 5).of_size(10, 5)));
    }
}
