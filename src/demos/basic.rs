use log::info;

use super::Demo;
use crate::color::{make_color, BLACK};
use crate::display::{InputEvent, PixelBuffer};
use crate::util::Rng;

const NUM_STARS: usize = 80;
const STAR_SEED: u64 = 797;

/// Orange ring, two blue diagonals and a fixed scatter of stars
pub struct Basic {
    /// Stars as fractions of the buffer size, so resizing keeps the layout
    stars: Vec<(f32, f32)>,
}

impl Basic {
    pub fn new() -> Self {
        let mut rng = Rng::new(STAR_SEED);
        let stars = (0..NUM_STARS)
            .map(|_| (rng.next_f32(), rng.next_f32()))
            .collect();
        Self { stars }
    }
}

impl Default for Basic {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Basic {
    fn update(&mut self, _dt: f32, _width: u32, _height: u32) {}

    fn render(&self, buffer: &mut PixelBuffer) {
        let w = buffer.width() as i32;
        let h = buffer.height() as i32;

        buffer.clear(BLACK);
        buffer.draw_circle(w / 2, h / 2, (w + h) / 8, make_color(255, 128, 0));
        let blue = make_color(0, 30, 220);
        buffer.line(10, 10, w - 10, h - 10, blue);
        buffer.line(w - 10, 10, 10, h - 10, blue);

        let star = make_color(220, 230, 250);
        for &(fx, fy) in &self.stars {
            buffer.set_pixel((fx * w as f32) as i32, (fy * h as f32) as i32, star);
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, .. } => match key.as_char() {
                Some(c) => info!("you pressed {}", c),
                None => info!("you pressed {:?}", key),
            },
            InputEvent::MouseDown { x, y, .. } => info!("click at ({}, {})", x, y),
            _ => {},
        }
    }

    fn name(&self) -> &str {
        "basic"
    }
}
