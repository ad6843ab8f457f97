mod blit;
mod font;
pub mod input;
mod pixel_buffer;
#[cfg(feature = "sdl")]
mod window;

pub use font::{
    draw_char, draw_text, draw_text_centered, glyph, text_height, text_width, FIRST_CHAR,
    GLYPH_HEIGHT, GLYPH_WIDTH, LAST_CHAR,
};
pub use input::{InputEvent, Key, Modifiers, MouseButton};
pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "sdl")]
pub use window::{Display, RenderTarget};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
