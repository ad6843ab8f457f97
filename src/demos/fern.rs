use super::Demo;
use crate::color::{make_color, BLACK, WHITE};
use crate::display::{draw_text, PixelBuffer};
use crate::util::Rng;

const ITERATIONS: u32 = 100_000;
const SEED: u64 = 42;

/// Barnsley fern drawn by the chaos game, colored by iteration
pub struct Fern {
    iterations: u32,
}

impl Fern {
    pub fn new() -> Self {
        Self {
            iterations: ITERATIONS,
        }
    }

    /// Pick one of the four affine maps by its probability and apply it
    fn next_point(x: f64, y: f64, r: f64) -> (f64, f64) {
        if r < 0.01 {
            // stem
            (0.0, 0.16 * y)
        } else if r < 0.86 {
            // successively smaller leaflets
            (0.85 * x + 0.04 * y, -0.04 * x + 0.85 * y + 1.6)
        } else if r < 0.93 {
            // largest left-hand leaflet
            (0.2 * x - 0.26 * y, 0.23 * x + 0.22 * y + 1.6)
        } else {
            // largest right-hand leaflet
            (-0.15 * x + 0.28 * y, 0.26 * x + 0.24 * y + 0.44)
        }
    }
}

impl Default for Fern {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Fern {
    fn update(&mut self, _dt: f32, _width: u32, _height: u32) {}

    fn render(&self, buffer: &mut PixelBuffer) {
        buffer.clear(BLACK);
        draw_text(buffer, 10, 10, "BARNSLEY FERN", WHITE);

        let w = buffer.width() as f64;
        let h = buffer.height() as f64;
        // the fern is about 10 units tall
        let scale = h / 10.0;
        let base = h - h / 12.0;

        let mut rng = Rng::new(SEED);
        let (mut x, mut y) = (0.0f64, 0.0f64);
        let n = self.iterations.max(1) as u64;
        for t in 0..n {
            (x, y) = Self::next_point(x, y, rng.next_f32() as f64);

            let px = (w / 2.0 + x * scale) as i32;
            let py = (base - y * scale) as i32;
            let color = make_color(
                (120 + 90 * t / n) as u8,
                (255 - 50 * t / n) as u8,
                (90 + 160 * t / n) as u8,
            );
            buffer.set_pixel(px, py, color);
        }
    }

    fn name(&self) -> &str {
        "fern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::pixel_components;

    #[test]
    fn test_maps_keep_fern_bounded() {
        let mut rng = Rng::new(1);
        let (mut x, mut y) = (0.0, 0.0);
        for _ in 0..10_000 {
            (x, y) = Fern::next_point(x, y, rng.next_f32() as f64);
            assert!((-3.0..3.0).contains(&x), "x = {x}");
            assert!((0.0..10.5).contains(&y), "y = {y}");
        }
    }

    #[test]
    fn test_render_is_deterministic_gradient() {
        let fern = Fern { iterations: 5_000 };
        let mut a = PixelBuffer::new(160, 120).unwrap();
        let mut b = PixelBuffer::new(160, 120).unwrap();
        fern.render(&mut a);
        fern.render(&mut b);
        assert_eq!(a.pixels(), b.pixels());

        let mut fern_pixels = 0;
        for &p in a.pixels() {
            if p == BLACK || p == WHITE {
                continue;
            }
            let (r, g, b) = pixel_components(p);
            assert!((120..210).contains(&r) && g > 205 && (90..250).contains(&b));
            fern_pixels += 1;
        }
        assert!(fern_pixels > 500, "only {fern_pixels} fern pixels");
    }
}
