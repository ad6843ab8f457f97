//! Alpha compositing of packed pixels

use serde::{Deserialize, Serialize};

use crate::color::{make_color_with_alpha, Pixel};

/// How a drawing primitive combines its color with the pixel already there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace the destination pixel
    #[default]
    Overwrite,
    /// Source-over using the source alpha; destination alpha is kept
    AlphaComposite,
}

impl BlendMode {
    #[inline]
    pub fn apply(self, src: Pixel, dst: Pixel) -> Pixel {
        match self {
            BlendMode::Overwrite => composite_pixel_opaque(src, dst),
            BlendMode::AlphaComposite => composite_pixel(src, dst),
        }
    }
}

/// Blend one 8-bit channel: `(mask * (src - dst) + 255 * dst) / 255`
///
/// Divides by 255 rather than shifting by 8: the shift loses enough that
/// masking several images in a row visibly darkens the result.
#[inline]
pub fn composite_channel(src: u8, dst: u8, mask: u8) -> u8 {
    let (s, d, m) = (src as i32, dst as i32, mask as i32);
    ((m * (s - d) + 255 * d) / 255) as u8
}

/// Source-over of `src` onto `dst` weighted by the source alpha.
/// The result keeps the destination's alpha.
#[inline]
pub fn composite_pixel(src: Pixel, dst: Pixel) -> Pixel {
    let mask = (src >> 24) as u8;
    match mask {
        0 => dst,
        _ => {
            let channel = |shift: u32| composite_channel((src >> shift) as u8, (dst >> shift) as u8, mask);
            make_color_with_alpha(channel(16), channel(8), channel(0), (dst >> 24) as u8)
        },
    }
}

/// Overwrite variant: the source wins unconditionally
#[inline]
pub fn composite_pixel_opaque(src: Pixel, _dst: Pixel) -> Pixel {
    src
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{color_to_values, make_color, BLUE, RED};

    #[test]
    fn test_channel_extremes() {
        for s in [0u8, 1, 100, 200, 255] {
            for d in [0u8, 1, 100, 200, 255] {
                assert_eq!(composite_channel(s, d, 0), d);
                assert_eq!(composite_channel(s, d, 255), s);
            }
        }
    }

    #[test]
    fn test_channel_uses_division_by_255() {
        // 128 * (255 - 0) / 255 = 128, a >> 8 would give 127
        assert_eq!(composite_channel(255, 0, 128), 128);
        assert_eq!(composite_channel(0, 255, 128), 127);
        assert_eq!(composite_channel(200, 100, 64), 125);
    }

    #[test]
    fn test_transparent_source_is_identity() {
        let dst = make_color_with_alpha(12, 34, 56, 78);
        for src in [0u32, 0x00FFFFFF, 0x00123456] {
            assert_eq!(composite_pixel(src, dst), dst);
        }
    }

    #[test]
    fn test_opaque_source_keeps_destination_alpha() {
        let dst = make_color_with_alpha(1, 2, 3, 77);
        let out = composite_pixel(make_color(200, 100, 50), dst);
        assert_eq!(color_to_values(out), [200, 100, 50, 77]);
    }

    #[test]
    fn test_half_alpha_red_over_blue() {
        let out = composite_pixel(make_color_with_alpha(255, 0, 0, 128), BLUE);
        let [r, g, b, a] = color_to_values(out);
        assert_eq!((r, g, b, a), (128, 0, 127, 255));
    }

    #[test]
    fn test_blend_mode_dispatch() {
        let src = make_color_with_alpha(255, 0, 0, 0);
        assert_eq!(BlendMode::Overwrite.apply(src, BLUE), src);
        assert_eq!(BlendMode::AlphaComposite.apply(src, BLUE), BLUE);
        assert_eq!(BlendMode::AlphaComposite.apply(RED, BLUE), RED);
        assert_eq!(BlendMode::default(), BlendMode::Overwrite);
    }
}
