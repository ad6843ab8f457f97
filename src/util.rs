//! Shared utilities for the demos and the frame loop

use std::collections::VecDeque;
use std::time::Instant;

use crate::color::{color_to_values, make_color_with_alpha, Pixel};

/// Deterministic xorshift64 generator, so seeded demos render identically
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [min, max)
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform in [min, max]; returns `min` when the range is empty
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }
}

/// Blend two pixels channel by channel, `t` clamped to [0, 1]
pub fn lerp_pixel(a: Pixel, b: Pixel, t: f32) -> Pixel {
    let t = t.clamp(0.0, 1.0);
    let (ca, cb) = (color_to_values(a), color_to_values(b));
    let mix = |i: usize| (ca[i] as f32 + (cb[i] as f32 - ca[i] as f32) * t).round() as u8;
    make_color_with_alpha(mix(0), mix(1), mix(2), mix(3))
}

/// Opaque pixel from hue (degrees), saturation and value in [0, 1]
pub fn hsv_to_pixel(h: f32, s: f32, v: f32) -> Pixel {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    make_color_with_alpha(to_u8(r1), to_u8(g1), to_u8(b1), 255)
}

// ============================================================================
// Frame Clock
// ============================================================================

/// Frame delta plus a rolling-average frame rate
pub struct FrameClock {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FrameClock {
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count: sample_count.max(1),
        }
    }

    /// Mark the start of a frame and return seconds since the previous one
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    /// Average frames per second over the sample window
    pub fn fps(&self) -> f32 {
        let avg_dt = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, RED, WHITE};

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        assert_ne!(Rng::new(1).next_u64(), Rng::new(2).next_u64());
    }

    #[test]
    fn test_rng_zero_seed_still_moves() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_rng_ranges() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
            let i = rng.range_i32(-3, 3);
            assert!((-3..=3).contains(&i));
            let g = rng.range_f32(10.0, 20.0);
            assert!((10.0..20.0).contains(&g));
        }
        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.range_i32(9, 2), 9);
        let _ = rng.range_i32(i32::MIN, i32::MAX);
    }

    #[test]
    fn test_lerp_pixel_endpoints() {
        assert_eq!(lerp_pixel(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(lerp_pixel(BLACK, WHITE, 1.0), WHITE);
        assert_eq!(lerp_pixel(BLACK, WHITE, 2.0), WHITE);
        assert_eq!(lerp_pixel(BLACK, WHITE, 0.5), 0xFF808080);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_pixel(0.0, 1.0, 1.0), RED);
        assert_eq!(hsv_to_pixel(360.0, 1.0, 1.0), RED);
        assert_eq!(hsv_to_pixel(120.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(hsv_to_pixel(0.0, 0.0, 0.0), BLACK);
    }

    #[test]
    fn test_frame_clock_window() {
        let mut clock = FrameClock::new(3);
        for dt in [0.5, 0.5, 0.1, 0.1, 0.1] {
            clock.record(dt);
        }
        assert_eq!(clock.frame_count(), 3);
        assert!((clock.fps() - 10.0).abs() < 1e-3);
        assert_eq!(FrameClock::new(4).fps(), 0.0);
    }
}
