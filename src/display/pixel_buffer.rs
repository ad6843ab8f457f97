use std::mem;
use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

use crate::color::{Pixel, TRANSPARENT};
use crate::composite::{composite_pixel, BlendMode};
use crate::error::{FinchError, Result};
use crate::geometry::Rect;

/// Last id handed out; ids are diagnostic only and start at 1
static LAST_BUFFER_ID: AtomicU32 = AtomicU32::new(0);

fn next_buffer_id() -> u32 {
    LAST_BUFFER_ID.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}

const BYTES_PER_PIXEL: usize = mem::size_of::<Pixel>();

// ============================================================================
// Storage
// ============================================================================

/// Backing pixels of a buffer: allocated by us or lent by the caller
enum Storage<'a> {
    Owned(Vec<Pixel>),
    Borrowed(&'a mut [Pixel]),
}

impl Storage<'_> {
    #[inline]
    fn as_slice(&self) -> &[Pixel] {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [Pixel] {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Rectangular grid of ARGB pixels with a row stride.
///
/// Pixel (x, y) lives at `y * stride + x`; the `stride - width` trailing
/// slots of each row are never read or written by drawing operations.
/// Every drawing call takes signed coordinates and clips silently.
pub struct PixelBuffer<'a> {
    id: u32,
    storage: Storage<'a>,
    width: u32,
    height: u32,
    stride: u32,
    size_bytes: usize,
}

impl PixelBuffer<'static> {
    /// Zeroed buffer with `stride == width`
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_stride(width, height, width)
    }

    /// Zeroed buffer with padded rows
    pub fn with_stride(width: u32, height: u32, stride: u32) -> Result<Self> {
        let required = required_bytes(stride, height);
        Self::allocate(width, height, stride, required)
    }

    /// Zeroed buffer backed by `size_hint` bytes of owned storage.
    ///
    /// `size_hint` must cover `stride * height` pixels; any excess is
    /// allocated but unused. Allocation failure is reported rather than
    /// aborting.
    pub fn allocate(width: u32, height: u32, stride: u32, size_hint: usize) -> Result<Self> {
        check_stride(width, stride)?;
        let required = required_bytes(stride, height);
        if size_hint < required {
            return Err(FinchError::SizeHintTooSmall {
                hint: size_hint,
                required,
            });
        }

        let len = size_hint / BYTES_PER_PIXEL;
        let mut pixels: Vec<Pixel> = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|source| FinchError::Allocation {
                bytes: size_hint,
                source,
            })?;
        pixels.resize(len, TRANSPARENT);

        let buffer = Self {
            id: next_buffer_id(),
            storage: Storage::Owned(pixels),
            width,
            height,
            stride,
            size_bytes: size_hint,
        };
        debug!(
            "buffer {} allocated: {}x{} stride {} ({} bytes, owned)",
            buffer.id, width, height, stride, size_hint
        );
        Ok(buffer)
    }
}

impl<'a> PixelBuffer<'a> {
    /// View over caller-owned pixels. The slice is never freed by the buffer.
    ///
    /// The slice must hold `stride * (height - 1) + width` pixels: the last
    /// row does not need its padding.
    pub fn from_slice(pixels: &'a mut [Pixel], width: u32, height: u32, stride: u32) -> Result<Self> {
        check_stride(width, stride)?;
        let required = match height {
            0 => 0,
            h => stride as usize * (h as usize - 1) + width as usize,
        };
        if pixels.len() < required {
            return Err(FinchError::StorageTooSmall {
                len: pixels.len(),
                required,
            });
        }

        let size_bytes = pixels.len() * BYTES_PER_PIXEL;
        let buffer = Self {
            id: next_buffer_id(),
            storage: Storage::Borrowed(pixels),
            width,
            height,
            stride,
            size_bytes,
        };
        debug!(
            "buffer {} wraps {}x{} stride {} ({} bytes, borrowed)",
            buffer.id, width, height, stride, size_bytes
        );
        Ok(buffer)
    }

    /// Release the buffer. Owned storage is freed, borrowed storage is
    /// handed back to its owner untouched.
    pub fn destroy(self) {
        drop(self);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per row in the backing storage
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Informational size of the backing storage in bytes
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Whole backing storage, padding included
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.storage.as_mut_slice()
    }

    /// Backing storage as native-endian bytes, for texture upload
    /// (pitch is `stride * 4`)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }

    /// Visible pixels of row `y`, or `None` past the last row
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.pixels()[start..start + self.width as usize])
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        let width = self.width as usize;
        Some(&mut self.pixels_mut()[start..start + width])
    }

    /// Extent of the buffer as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, clamp_i32(self.width as i64), clamp_i32(self.height as i64))
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    /// Storage index of pixel (x, y)
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride as usize + x as usize
    }

    // ========================================================================
    // Single Pixels
    // ========================================================================

    /// Pixel at (x, y), or [`TRANSPARENT`] outside the buffer
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        if self.in_bounds(x as i64, y as i64) {
            self.pixels()[self.index(x as u32, y as u32)]
        } else {
            TRANSPARENT
        }
    }

    /// Overwrite the pixel at (x, y); no-op outside the buffer
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        self.plot(x as i64, y as i64, color, BlendMode::Overwrite);
    }

    /// Composite `color` over the pixel at (x, y); no-op outside the buffer
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        self.plot(x as i64, y as i64, color, BlendMode::AlphaComposite);
    }

    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Pixel, mode: BlendMode) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            let dst = &mut self.pixels_mut()[idx];
            *dst = mode.apply(color, *dst);
        }
    }

    /// Overwrite every visible pixel
    pub fn clear(&mut self, color: Pixel) {
        let (w, h) = (clamp_i32(self.width as i64), clamp_i32(self.height as i64));
        self.fill_rect(0, 0, w, h, color);
    }

    // ========================================================================
    // Runs
    // ========================================================================

    /// Composite `color` over the inclusive run `x1..=x2` on row `y`.
    /// Draws nothing when `x1 > x2`.
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Pixel) {
        self.composite_run(x1 as i64, x2 as i64, y as i64, color);
    }

    /// Composite `color` over the inclusive run `y1..=y2` in column `x`.
    /// Draws nothing when `y1 > y2`.
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Pixel) {
        let (x, y1, y2) = (x as i64, y1 as i64, y2 as i64);
        if y1 > y2 || x < 0 || x >= self.width as i64 || y2 < 0 || y1 >= self.height as i64 {
            return;
        }
        let y1 = y1.max(0) as u32;
        let y2 = y2.min(self.height as i64 - 1) as u32;
        for y in y1..=y2 {
            let idx = self.index(x as u32, y);
            let dst = &mut self.pixels_mut()[idx];
            *dst = composite_pixel(color, *dst);
        }
    }

    fn composite_run(&mut self, x1: i64, x2: i64, y: i64, color: Pixel) {
        if x1 > x2 || y < 0 || y >= self.height as i64 || x2 < 0 || x1 >= self.width as i64 {
            return;
        }
        let x1 = x1.max(0) as u32;
        let x2 = x2.min(self.width as i64 - 1) as u32;
        let start = self.index(x1, y as u32);
        let end = start + (x2 - x1) as usize + 1;
        for dst in &mut self.pixels_mut()[start..end] {
            *dst = composite_pixel(color, *dst);
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Opaque line from (x1, y1) towards (x2, y2)
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Pixel) {
        self.line_with(x1, y1, x2, y2, color, BlendMode::Overwrite);
    }

    /// Alpha-composited line from (x1, y1) towards (x2, y2)
    pub fn line_composite(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Pixel) {
        self.line_with(x1, y1, x2, y2, color, BlendMode::AlphaComposite);
    }

    /// Bresenham line in any of the 8 octants.
    ///
    /// The line is mapped onto a shallow left-to-right one (swap axes when
    /// steep, negate x when running backwards), walked with the integer
    /// decision variable and mapped back per pixel. The walk stops when the
    /// major axis reaches the stop coordinate, so the final endpoint is not
    /// plotted and a zero-length line draws nothing.
    pub fn line_with(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Pixel, mode: BlendMode) {
        let (mut start_x, mut start_y) = (x1 as i64, y1 as i64);
        let (mut stop_x, mut stop_y) = (x2 as i64, y2 as i64);
        let mut abs_dx = (start_x - stop_x).abs();
        let mut abs_dy = (start_y - stop_y).abs();

        let steep = abs_dy > abs_dx;
        if steep {
            mem::swap(&mut start_x, &mut start_y);
            mem::swap(&mut stop_x, &mut stop_y);
            mem::swap(&mut abs_dx, &mut abs_dy);
        }

        let backwards = start_x > stop_x;
        if backwards {
            start_x = -start_x;
            stop_x = -stop_x;
        }

        let dy2 = abs_dy * 2;
        let dy_minus_dx2 = 2 * (abs_dy - abs_dx);
        let mut preference = dy2 - abs_dx;
        let y_step = if start_y < stop_y { 1 } else { -1 };

        let (mut cx, mut cy) = (start_x, start_y);
        while cx < stop_x {
            let (px, py) = match (steep, backwards) {
                (false, false) => (cx, cy),
                (false, true) => (-cx, cy),
                (true, false) => (cy, cx),
                (true, true) => (cy, -cx),
            };
            self.plot(px, py, color, mode);

            cx += 1;
            if preference < 0 {
                preference += dy2;
            } else {
                cy += y_step;
                preference += dy_minus_dx2;
            }
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Outline of the rectangle covering `left..right` x `top..bottom`
    /// (exclusive right/bottom). Edges are composited and each corner is
    /// painted once.
    pub fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Pixel) {
        let r = Rect::new(left, top, right, bottom).normalized();
        if r.is_empty() {
            return;
        }
        let (left, top) = (r.left as i64, r.top as i64);
        let (right, bottom) = (r.right as i64 - 1, r.bottom as i64 - 1);

        self.composite_run(left, right, top, color);
        if bottom != top {
            self.composite_run(left, right, bottom, color);
        }
        if bottom - top >= 2 {
            let (y1, y2) = (clamp_i32(top + 1), clamp_i32(bottom - 1));
            self.vline(clamp_i32(left), y1, y2, color);
            if right != left {
                self.vline(clamp_i32(right), y1, y2, color);
            }
        }
    }

    pub fn draw_rect_in(&mut self, rect: Rect, color: Pixel) {
        self.draw_rect(rect.left, rect.top, rect.right, rect.bottom, color);
    }

    /// Overwrite every pixel in `left..right` x `top..bottom`, clipped
    pub fn fill_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Pixel) {
        let r = Rect::new(left, top, right, bottom).normalized();
        let x1 = (r.left as i64).max(0);
        let y1 = (r.top as i64).max(0);
        let x2 = (r.right as i64).min(self.width as i64);
        let y2 = (r.bottom as i64).min(self.height as i64);
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let run = (x2 - x1) as usize;
        for y in y1 as u32..y2 as u32 {
            let start = self.index(x1 as u32, y);
            self.pixels_mut()[start..start + run].fill(color);
        }
    }

    pub fn fill_rect_in(&mut self, rect: Rect, color: Pixel) {
        self.fill_rect(rect.left, rect.top, rect.right, rect.bottom, color);
    }

    // ========================================================================
    // Circles
    // ========================================================================

    /// Midpoint circle outline. Each step composites all 8 mirrored
    /// points, so points on the axes and diagonals are composited more than
    /// once. Negative radii draw nothing; radius 0 composites the centre 8
    /// times.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Pixel) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        if r < 0 || self.circle_offscreen(cx, cy, r) {
            return;
        }

        let (mut x, mut y, mut p) = (0i64, r, 1 - r);
        self.plot_octants(cx, cy, x, y, color);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            self.plot_octants(cx, cy, x, y, color);
        }
    }

    /// Solid disk from the same decision sequence as [`draw_circle`]: four
    /// composited horizontal runs per step. Rows the sequence revisits are
    /// composited again.
    ///
    /// [`draw_circle`]: PixelBuffer::draw_circle
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Pixel) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        if r < 0 || self.circle_offscreen(cx, cy, r) {
            return;
        }

        let (mut x, mut y, mut p) = (0i64, r, 1 - r);
        self.fill_bands(cx, cy, x, y, color);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            self.fill_bands(cx, cy, x, y, color);
        }
    }

    /// Narrow runs on rows cy +/- y, wide runs on rows cy +/- x
    fn fill_bands(&mut self, cx: i64, cy: i64, x: i64, y: i64, color: Pixel) {
        self.composite_run(cx - x, cx + x, cy + y, color);
        self.composite_run(cx - x, cx + x, cy - y, color);
        self.composite_run(cx - y, cx + y, cy + x, color);
        self.composite_run(cx - y, cx + y, cy - x, color);
    }

    fn circle_offscreen(&self, cx: i64, cy: i64, r: i64) -> bool {
        cx + r < 0 || cy + r < 0 || cx - r >= self.width as i64 || cy - r >= self.height as i64
    }

    /// Composite the 8 symmetric points of (x, y), duplicates included
    fn plot_octants(&mut self, cx: i64, cy: i64, x: i64, y: i64, color: Pixel) {
        for (dx, dy) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
            self.plot(cx + dx, cy + dy, color, BlendMode::AlphaComposite);
        }
    }
}

impl Drop for PixelBuffer<'_> {
    fn drop(&mut self) {
        debug!(
            "buffer {} released ({})",
            self.id,
            if self.is_owned() { "owned" } else { "borrowed" }
        );
    }
}

impl std::fmt::Debug for PixelBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("size_bytes", &self.size_bytes)
            .field("owned", &self.is_owned())
            .finish()
    }
}

fn check_stride(width: u32, stride: u32) -> Result<()> {
    if stride < width {
        return Err(FinchError::InvalidStride { width, stride });
    }
    Ok(())
}

fn required_bytes(stride: u32, height: u32) -> usize {
    stride as usize * height as usize * BYTES_PER_PIXEL
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
