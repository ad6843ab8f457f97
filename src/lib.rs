//! finch - a small software rasterizer.
//!
//! Draws pixels, lines, rectangles, circles and 8x8 bitmap text straight into
//! an in-memory ARGB pixel buffer and composites buffers together with alpha
//! blending. Window creation and event polling live behind the optional `sdl`
//! feature; everything else works on plain pixel slices.

pub mod color;
pub mod composite;
pub mod config;
pub mod convert;
pub mod demos;
pub mod display;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod util;

pub use color::{Pixel, Rgb24};
pub use composite::BlendMode;
pub use display::PixelBuffer;
pub use error::{FinchError, Result};
pub use geometry::Rect;
