//! Animated programs driven by the windowed runner and the headless renderer

mod basic;
mod bounce;
mod fern;
mod sprites;
mod text;

pub use basic::Basic;
pub use bounce::Bounce;
pub use fern::Fern;
pub use sprites::Sprites;
pub use text::TextDemo;

use crate::display::{InputEvent, PixelBuffer};

/// A program that draws into the shell's pixel buffer each frame
pub trait Demo {
    /// Advance state
    /// - dt: seconds since the previous frame
    /// - width/height: size of the buffer the next render will get
    fn update(&mut self, dt: f32, width: u32, height: u32);

    fn render(&self, buffer: &mut PixelBuffer);

    /// React to input; the default ignores everything
    fn handle_event(&mut self, _event: &InputEvent) {}

    fn name(&self) -> &str;
}

/// Demo names accepted by [`by_name`], in cycling order
pub const NAMES: [&str; 5] = ["basic", "bounce", "fern", "text", "sprites"];

pub fn by_name(name: &str) -> Option<Box<dyn Demo>> {
    let demo: Box<dyn Demo> = match name {
        "basic" => Box::new(Basic::new()),
        "bounce" => Box::new(Bounce::new()),
        "fern" => Box::new(Fern::new()),
        "text" => Box::new(TextDemo::new()),
        "sprites" => Box::new(Sprites::new()),
        _ => return None,
    };
    Some(demo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;

    #[test]
    fn test_every_name_resolves() {
        for name in NAMES {
            let demo = by_name(name).unwrap();
            assert_eq!(demo.name(), name);
        }
        assert!(by_name("plasma").is_none());
    }

    #[test]
    fn test_every_demo_draws_something() {
        for name in NAMES {
            let mut demo = by_name(name).unwrap();
            let mut buffer = PixelBuffer::new(320, 240).unwrap();
            buffer.clear(BLACK);
            demo.update(0.1, 320, 240);
            demo.render(&mut buffer);
            let distinct = buffer.pixels().iter().filter(|&&p| p != BLACK).count();
            assert!(distinct > 100, "{name} drew only {distinct} pixels");
        }
    }

    #[test]
    fn test_demos_survive_tiny_buffers() {
        for name in NAMES {
            let mut demo = by_name(name).unwrap();
            let mut buffer = PixelBuffer::new(3, 2).unwrap();
            demo.update(1.0, 3, 2);
            demo.render(&mut buffer);
        }
    }
}
