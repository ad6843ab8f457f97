//! Packed 32-bit pixel model
//!
//! A [`Pixel`] is `0xAARRGGBB`: alpha in the most significant byte, then red,
//! green and blue. Stored little-endian this puts blue at byte 0 and alpha at
//! byte 3, which is what an ARGB8888 presentation surface expects.

use serde::{Deserialize, Serialize};

/// Packed ARGB pixel, `0xAARRGGBB`
pub type Pixel = u32;

pub const WHITE: Pixel = 0xFFFFFFFF;
pub const BLACK: Pixel = 0xFF000000;
pub const RED: Pixel = 0xFFFF0000;
pub const GREEN: Pixel = 0xFF00FF00;
pub const BLUE: Pixel = 0xFF0000FF;
pub const YELLOW: Pixel = 0xFFFFFF00;
pub const CYAN: Pixel = 0xFF00FFFF;
pub const MAGENTA: Pixel = 0xFFFF00FF;
pub const GRAY: Pixel = 0xFF808080;
pub const DARK_GRAY: Pixel = 0xFF404040;
pub const LIGHT_GRAY: Pixel = 0xFFC0C0C0;
/// Fully transparent black; also what out-of-range reads return
pub const TRANSPARENT: Pixel = 0;

const ALPHA_SHIFT: u32 = 24;
const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;

/// Opaque pixel from red, green and blue
#[inline]
pub const fn make_color(r: u8, g: u8, b: u8) -> Pixel {
    make_color_with_alpha(r, g, b, 255)
}

/// Pixel from red, green, blue and alpha
#[inline]
pub const fn make_color_with_alpha(r: u8, g: u8, b: u8, a: u8) -> Pixel {
    ((a as u32) << ALPHA_SHIFT) | ((r as u32) << RED_SHIFT) | ((g as u32) << GREEN_SHIFT) | b as u32
}

/// Split a pixel into `[r, g, b, a]`
#[inline]
pub const fn color_to_values(pixel: Pixel) -> [u8; 4] {
    [
        (pixel >> RED_SHIFT) as u8,
        (pixel >> GREEN_SHIFT) as u8,
        pixel as u8,
        (pixel >> ALPHA_SHIFT) as u8,
    ]
}

/// Red, green and blue of a pixel, alpha dropped
#[inline]
pub const fn pixel_components(pixel: Pixel) -> (u8, u8, u8) {
    ((pixel >> RED_SHIFT) as u8, (pixel >> GREEN_SHIFT) as u8, pixel as u8)
}

#[inline]
pub const fn pixel_alpha(pixel: Pixel) -> u8 {
    (pixel >> ALPHA_SHIFT) as u8
}

/// Replace the alpha byte, keeping the color channels
#[inline]
pub const fn with_alpha(pixel: Pixel, alpha: u8) -> Pixel {
    (pixel & 0x00FF_FFFF) | ((alpha as u32) << ALPHA_SHIFT)
}

// ============================================================================
// Rgb24
// ============================================================================

/// 24-bit color without alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb24 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb24 {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Opaque pixel
    #[inline]
    pub const fn to_pixel(self) -> Pixel {
        make_color(self.red, self.green, self.blue)
    }

    #[inline]
    pub const fn to_pixel_with_alpha(self, alpha: u8) -> Pixel {
        make_color_with_alpha(self.red, self.green, self.blue, alpha)
    }

    /// Color channels of a pixel; alpha is discarded
    #[inline]
    pub const fn from_pixel(pixel: Pixel) -> Self {
        let (red, green, blue) = pixel_components(pixel);
        Self { red, green, blue }
    }
}

impl From<Rgb24> for Pixel {
    fn from(c: Rgb24) -> Self {
        c.to_pixel()
    }
}

impl From<(u8, u8, u8)> for Rgb24 {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self { red, green, blue }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_opaque() {
        for c in [
            WHITE, BLACK, RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA, GRAY, DARK_GRAY, LIGHT_GRAY,
        ] {
            assert_eq!(pixel_alpha(c), 255, "{:08X} should be opaque", c);
        }
        assert_eq!(make_color(255, 0, 0), RED);
        assert_eq!(make_color(0x80, 0x80, 0x80), GRAY);
    }

    #[test]
    fn test_round_trip_rgb() {
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(5) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    assert_eq!(pixel_components(make_color(r, g, b)), (r, g, b));
                }
            }
        }
    }

    #[test]
    fn test_round_trip_rgba() {
        for a in [0u8, 1, 64, 128, 200, 255] {
            for r in (0..=255u8).step_by(17) {
                for g in (0..=255u8).step_by(51) {
                    for b in (0..=255u8).step_by(85) {
                        assert_eq!(
                            color_to_values(make_color_with_alpha(r, g, b, a)),
                            [r, g, b, a]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_values_round_trip_any_pixel() {
        for p in [0u32, 1, 0x12345678, 0xDEADBEEF, 0x80FF00FF, u32::MAX] {
            let [r, g, b, a] = color_to_values(p);
            assert_eq!(make_color_with_alpha(r, g, b, a), p);
        }
    }

    #[test]
    fn test_memory_layout_is_bgra() {
        let p = make_color_with_alpha(0x11, 0x22, 0x33, 0x44);
        assert_eq!(p.to_le_bytes(), [0x33, 0x22, 0x11, 0x44]);
    }

    #[test]
    fn test_rgb24_conversions() {
        let c = Rgb24::new(10, 20, 30);
        assert_eq!(Pixel::from(c), make_color(10, 20, 30));
        assert_eq!(c.to_pixel_with_alpha(7), make_color_with_alpha(10, 20, 30, 7));
        assert_eq!(Rgb24::from_pixel(c.to_pixel_with_alpha(0)), c);
        assert_eq!(with_alpha(RED, 128), 0x80FF0000);
    }
}
