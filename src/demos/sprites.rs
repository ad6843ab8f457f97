use log::warn;

use super::Demo;
use crate::color::{make_color, make_color_with_alpha, BLACK, WHITE};
use crate::display::{draw_text, PixelBuffer};
use crate::util::lerp_pixel;

const SPRITE_SIZE: u32 = 48;
const TILE: i32 = 16;
const NUM_SPRITES: usize = 6;

/// Translucent sprites orbiting across a checkerboard, partly off screen
pub struct Sprites {
    sprite: Option<PixelBuffer<'static>>,
    time: f32,
}

impl Sprites {
    pub fn new() -> Self {
        let sprite = match Self::build_sprite() {
            Ok(sprite) => Some(sprite),
            Err(e) => {
                warn!("could not build sprite: {}", e);
                None
            },
        };
        Self { sprite, time: 0.0 }
    }

    /// A soft disc whose alpha falls off toward the edge, with a solid core.
    /// Written with overwrite so the alpha channel survives into the blit.
    fn build_sprite() -> crate::Result<PixelBuffer<'static>> {
        let mut sprite = PixelBuffer::new(SPRITE_SIZE, SPRITE_SIZE)?;
        sprite.clear(0);
        let c = SPRITE_SIZE as i32 / 2;
        let r2 = c * c;
        for y in 0..SPRITE_SIZE as i32 {
            for x in 0..SPRITE_SIZE as i32 {
                let d2 = (x - c) * (x - c) + (y - c) * (y - c);
                if d2 >= r2 {
                    continue;
                }
                let alpha = 255 - (d2 * 255 / r2);
                let color = if d2 < r2 / 16 {
                    make_color(255, 255, 255)
                } else {
                    make_color_with_alpha(255, 80 + (x * 3) as u8, 40 + (y * 4) as u8, alpha as u8)
                };
                sprite.set_pixel(x, y, color);
            }
        }
        Ok(sprite)
    }

    fn draw_checkerboard(buffer: &mut PixelBuffer) {
        let light = make_color(70, 70, 90);
        let dark = make_color(40, 40, 55);
        let w = buffer.width() as i32;
        let h = buffer.height() as i32;
        let fade = make_color(10, 10, 20);
        for ty in (0..h).step_by(TILE as usize) {
            // tiles darken toward the bottom
            let t = ty as f32 / h.max(1) as f32 * 0.6;
            let (light, dark) = (lerp_pixel(light, fade, t), lerp_pixel(dark, fade, t));
            for tx in (0..w).step_by(TILE as usize) {
                let color = if (tx / TILE + ty / TILE) % 2 == 0 { light } else { dark };
                buffer.fill_rect(tx, ty, tx + TILE, ty + TILE, color);
            }
        }
    }

    /// Top-left corner of sprite `i`; orbits are wide enough to leave the
    /// buffer on every side
    fn sprite_position(&self, i: usize, w: i32, h: i32) -> (i32, i32) {
        let phase = self.time * 0.8 + i as f32 * std::f32::consts::TAU / NUM_SPRITES as f32;
        let half = SPRITE_SIZE as f32 / 2.0;
        let x = w as f32 / 2.0 + phase.cos() * (w as f32 / 2.0 + half * 0.5) - half;
        let y = h as f32 / 2.0 + (phase * 1.3).sin() * (h as f32 / 2.0 + half * 0.5) - half;
        (x as i32, y as i32)
    }
}

impl Default for Sprites {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Sprites {
    fn update(&mut self, dt: f32, _width: u32, _height: u32) {
        self.time += dt;
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        Self::draw_checkerboard(buffer);
        let w = buffer.width() as i32;
        let h = buffer.height() as i32;
        if let Some(sprite) = &self.sprite {
            for i in 0..NUM_SPRITES {
                let (x, y) = self.sprite_position(i, w, h);
                buffer.blit_composite(sprite, x, y);
            }
        }
        draw_text(buffer, 10, 10, "SPRITES", WHITE);
        buffer.draw_rect(0, 0, w, h, BLACK);
    }

    fn name(&self) -> &str {
        "sprites"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::pixel_alpha;

    #[test]
    fn test_sprite_alpha_falls_off() {
        let sprite = Sprites::build_sprite().unwrap();
        let c = SPRITE_SIZE as i32 / 2;
        assert_eq!(sprite.get_pixel(c, c), WHITE);
        assert_eq!(sprite.get_pixel(0, 0), 0);
        let inner = pixel_alpha(sprite.get_pixel(c + 8, c));
        let outer = pixel_alpha(sprite.get_pixel(c + 20, c));
        assert!(inner > outer && outer > 0);
    }

    #[test]
    fn test_sprites_leave_the_screen() {
        let mut demo = Sprites::new();
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        for _ in 0..400 {
            demo.update(0.05, 320, 240);
            for i in 0..NUM_SPRITES {
                let (x, y) = demo.sprite_position(i, 320, 240);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
            }
        }
        assert!(min_x < 0 && min_y < 0);
    }

    #[test]
    fn test_translucent_edge_blends_with_background() {
        let mut demo = Sprites::new();
        demo.time = 0.0;
        let mut buffer = PixelBuffer::new(320, 240).unwrap();
        demo.render(&mut buffer);
        let c = SPRITE_SIZE as i32 / 2;
        let (x, y) = (0..NUM_SPRITES)
            .map(|i| demo.sprite_position(i, 320, 240))
            .find(|&(x, y)| (1..300).contains(&(x + c + 18)) && (30..230).contains(&(y + c)))
            .unwrap();
        // partway out from the core the sprite is neither opaque nor absent
        let px = buffer.get_pixel(x + c + 18, y + c);
        let sp = demo.sprite.as_ref().unwrap().get_pixel(c + 18, c);
        assert_ne!(px, sp | 0xFF00_0000);
        assert_eq!(pixel_alpha(px), 255);
    }
}
