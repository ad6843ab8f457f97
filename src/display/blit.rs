//! Buffer-to-buffer transfer with clipping

use log::trace;

use super::PixelBuffer;
use crate::composite::{composite_pixel, BlendMode};

/// Region of a blit that survives clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlitSpan {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    cols: usize,
    rows: u32,
}

/// Clip a `src_w` x `src_h` source placed at (x, y) against a
/// `dst_w` x `dst_h` destination. Negative offsets skip leading source
/// rows and columns.
fn clip_span(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, x: i32, y: i32) -> Option<BlitSpan> {
    let (x, y) = (x as i64, y as i64);
    if x >= dst_w as i64 || y >= dst_h as i64 {
        return None;
    }

    let left = x.max(0);
    let top = y.max(0);
    let right = (x + src_w as i64).min(dst_w as i64);
    let bottom = (y + src_h as i64).min(dst_h as i64);
    if right <= left || bottom <= top {
        return None;
    }

    Some(BlitSpan {
        src_x: (left - x) as u32,
        src_y: (top - y) as u32,
        dst_x: left as u32,
        dst_y: top as u32,
        cols: (right - left) as usize,
        rows: (bottom - top) as u32,
    })
}

impl PixelBuffer<'_> {
    /// Copy all of `src` into this buffer with its top-left corner at (x, y),
    /// overwriting the destination
    pub fn blit(&mut self, src: &PixelBuffer<'_>, x: i32, y: i32) {
        self.blit_with(src, x, y, BlendMode::Overwrite);
    }

    /// Composite all of `src` over this buffer at (x, y). Fully transparent
    /// source pixels leave the destination untouched.
    pub fn blit_composite(&mut self, src: &PixelBuffer<'_>, x: i32, y: i32) {
        self.blit_with(src, x, y, BlendMode::AlphaComposite);
    }

    pub fn blit_with(&mut self, src: &PixelBuffer<'_>, x: i32, y: i32, mode: BlendMode) {
        let Some(span) = clip_span(src.width(), src.height(), self.width(), self.height(), x, y) else {
            trace!(
                "blit of buffer {} into {} at ({}, {}) clipped away",
                src.id(),
                self.id(),
                x,
                y
            );
            return;
        };

        for row in 0..span.rows {
            let s = src.index(span.src_x, span.src_y + row);
            let d = self.index(span.dst_x, span.dst_y + row);
            let src_row = &src.pixels()[s..s + span.cols];
            let dst_row = &mut self.pixels_mut()[d..d + span.cols];
            match mode {
                BlendMode::Overwrite => dst_row.copy_from_slice(src_row),
                BlendMode::AlphaComposite => {
                    for (dp, &sp) in dst_row.iter_mut().zip(src_row) {
                        *dp = composite_pixel(sp, *dp);
                    }
                },
            }
        }
    }
}
