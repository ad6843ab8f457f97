//! Conversion between interleaved byte images and packed pixels

use crate::color::{color_to_values, make_color, make_color_with_alpha, pixel_components, Pixel};
use crate::display::PixelBuffer;
use crate::error::{FinchError, Result};

fn check_len(len: usize, width: u32, height: u32, per_pixel: usize) -> Result<usize> {
    let pixels = width as usize * height as usize;
    let required = pixels * per_pixel;
    if len < required {
        return Err(FinchError::StorageTooSmall { len, required });
    }
    Ok(pixels)
}

/// Pack row-major R,G,B,A bytes into pixels, alpha kept exactly.
/// Neither side has row padding.
pub fn convert_rgba8(dst: &mut [Pixel], src: &[u8], width: u32, height: u32) -> Result<()> {
    let count = check_len(src.len(), width, height, 4)?;
    check_len(dst.len(), width, height, 1)?;
    for (out, px) in dst[..count].iter_mut().zip(src.chunks_exact(4)) {
        *out = make_color_with_alpha(px[0], px[1], px[2], px[3]);
    }
    Ok(())
}

/// Pack row-major R,G,B bytes into opaque pixels
pub fn convert_rgb8(dst: &mut [Pixel], src: &[u8], width: u32, height: u32) -> Result<()> {
    let count = check_len(src.len(), width, height, 3)?;
    check_len(dst.len(), width, height, 1)?;
    for (out, px) in dst[..count].iter_mut().zip(src.chunks_exact(3)) {
        *out = make_color(px[0], px[1], px[2]);
    }
    Ok(())
}

/// Visible pixels as tightly packed R,G,B bytes; row padding is skipped
pub fn export_rgb8(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.width() as usize * buffer.height() as usize * 3);
    for y in 0..buffer.height() {
        for &p in buffer.row(y).unwrap_or_default() {
            let (r, g, b) = pixel_components(p);
            out.extend_from_slice(&[r, g, b]);
        }
    }
    out
}

/// Visible pixels as tightly packed R,G,B,A bytes
pub fn export_rgba8(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.width() as usize * buffer.height() as usize * 4);
    for y in 0..buffer.height() {
        for &p in buffer.row(y).unwrap_or_default() {
            out.extend_from_slice(&color_to_values(p));
        }
    }
    out
}

impl PixelBuffer<'static> {
    /// Owned buffer filled from interleaved R,G,B,A bytes
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut buffer = PixelBuffer::new(width, height)?;
        convert_rgba8(buffer.pixels_mut(), bytes, width, height)?;
        Ok(buffer)
    }

    /// Owned buffer filled from interleaved R,G,B bytes, fully opaque
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut buffer = PixelBuffer::new(width, height)?;
        convert_rgb8(buffer.pixels_mut(), bytes, width, height)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED, WHITE};

    #[test]
    fn test_rgba8_keeps_alpha() {
        let src = [255, 0, 0, 255, 0, 255, 0, 128, 1, 2, 3, 0];
        let mut dst = [0u32; 3];
        convert_rgba8(&mut dst, &src, 3, 1).unwrap();
        assert_eq!(dst, [RED, 0x8000FF00, 0x00010203]);
    }

    #[test]
    fn test_rgb8_is_opaque() {
        let src = [255, 0, 0, 0, 0, 255, 255, 255, 255, 10, 20, 30];
        let mut dst = [0u32; 4];
        convert_rgb8(&mut dst, &src, 2, 2).unwrap();
        assert_eq!(dst, [RED, BLUE, WHITE, 0xFF0A141E]);
    }

    #[test]
    fn test_short_input_is_rejected() {
        let mut dst = [0u32; 4];
        assert!(matches!(
            convert_rgb8(&mut dst, &[0; 11], 2, 2),
            Err(FinchError::StorageTooSmall { len: 11, required: 12 })
        ));
        assert!(matches!(
            convert_rgba8(&mut dst[..3], &[0; 16], 2, 2),
            Err(FinchError::StorageTooSmall { len: 3, required: 4 })
        ));
    }

    #[test]
    fn test_export_skips_padding() {
        let mut buf = PixelBuffer::with_stride(2, 2, 4).unwrap();
        buf.clear(RED);
        buf.set_pixel(1, 1, 0x80102030);
        assert_eq!(export_rgb8(&buf), vec![255, 0, 0, 255, 0, 0, 255, 0, 0, 0x10, 0x20, 0x30]);
        let rgba = export_rgba8(&buf);
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[12..], &[0x10, 0x20, 0x30, 0x80]);
    }

    #[test]
    fn test_from_rgba8_round_trips_export() {
        let bytes: Vec<u8> = (0..4 * 3 * 2).map(|i| (i * 11) as u8).collect();
        let buf = PixelBuffer::from_rgba8(3, 2, &bytes).unwrap();
        assert_eq!(export_rgba8(&buf), bytes);
        assert!(PixelBuffer::from_rgb8(3, 2, &bytes[..17]).is_err());
    }
}
