//! Serializable lists of drawing calls.
//!
//! A scene is plain JSON: a canvas size, an optional background and a list
//! of commands tagged by `"op"`, each mapping onto one buffer operation.
//!
//! ```json
//! { "name": "demo", "width": 80, "height": 60, "background": "#000000",
//!   "commands": [ { "op": "fill_circle", "cx": 40, "cy": 30, "radius": 16,
//!                   "color": [0, 255, 0] } ] }
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::{make_color, make_color_with_alpha, Pixel};
use crate::composite::BlendMode;
use crate::display::{draw_text, draw_text_centered, PixelBuffer};
use crate::error::{FinchError, Result};

// ============================================================================
// Colors
// ============================================================================

/// Color as written in a scene file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `[r, g, b]`, opaque
    Rgb([u8; 3]),
    /// `[r, g, b, a]`
    Rgba([u8; 4]),
    /// `"#RRGGBB"`, `"#AARRGGBB"`, or the same digits after `0x`
    Hex(String),
}

impl ColorSpec {
    pub fn to_pixel(&self) -> Result<Pixel> {
        match self {
            ColorSpec::Rgb([r, g, b]) => Ok(make_color(*r, *g, *b)),
            ColorSpec::Rgba([r, g, b, a]) => Ok(make_color_with_alpha(*r, *g, *b, *a)),
            ColorSpec::Hex(s) => parse_hex(s),
        }
    }
}

impl From<Pixel> for ColorSpec {
    fn from(p: Pixel) -> Self {
        ColorSpec::Hex(format!("#{:08X}", p))
    }
}

fn parse_hex(s: &str) -> Result<Pixel> {
    let invalid = || FinchError::InvalidColor(s.to_string());
    let digits = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    match digits.len() {
        6 => Ok(0xFF00_0000 | value),
        8 => Ok(value),
        _ => Err(invalid()),
    }
}

// ============================================================================
// Commands
// ============================================================================

/// One drawing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: ColorSpec,
    },
    Pixel {
        x: i32,
        y: i32,
        color: ColorSpec,
    },
    Hline {
        x1: i32,
        x2: i32,
        y: i32,
        color: ColorSpec,
    },
    Vline {
        x: i32,
        y1: i32,
        y2: i32,
        color: ColorSpec,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: ColorSpec,
        #[serde(default)]
        blend: BlendMode,
    },
    Rect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        color: ColorSpec,
    },
    FillRect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        color: ColorSpec,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: ColorSpec,
    },
    FillCircle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: ColorSpec,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: ColorSpec,
    },
    TextCentered {
        cx: i32,
        cy: i32,
        text: String,
        color: ColorSpec,
    },
}

impl DrawCommand {
    pub fn color(&self) -> &ColorSpec {
        match self {
            DrawCommand::Clear { color }
            | DrawCommand::Pixel { color, .. }
            | DrawCommand::Hline { color, .. }
            | DrawCommand::Vline { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Rect { color, .. }
            | DrawCommand::FillRect { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::FillCircle { color, .. }
            | DrawCommand::Text { color, .. }
            | DrawCommand::TextCentered { color, .. } => color,
        }
    }

    /// Run the command against `buffer`
    pub fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let c = self.color().to_pixel()?;
        match *self {
            DrawCommand::Clear { .. } => buffer.clear(c),
            DrawCommand::Pixel { x, y, .. } => buffer.set_pixel(x, y, c),
            DrawCommand::Hline { x1, x2, y, .. } => buffer.hline(x1, x2, y, c),
            DrawCommand::Vline { x, y1, y2, .. } => buffer.vline(x, y1, y2, c),
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                blend,
                ..
            } => buffer.line_with(x1, y1, x2, y2, c, blend),
            DrawCommand::Rect {
                left,
                top,
                right,
                bottom,
                ..
            } => buffer.draw_rect(left, top, right, bottom, c),
            DrawCommand::FillRect {
                left,
                top,
                right,
                bottom,
                ..
            } => buffer.fill_rect(left, top, right, bottom, c),
            DrawCommand::Circle { cx, cy, radius, .. } => buffer.draw_circle(cx, cy, radius, c),
            DrawCommand::FillCircle { cx, cy, radius, .. } => buffer.fill_circle(cx, cy, radius, c),
            DrawCommand::Text { x, y, ref text, .. } => draw_text(buffer, x, y, text, c),
            DrawCommand::TextCentered {
                cx, cy, ref text, ..
            } => draw_text_centered(buffer, cx, cy, text, c),
        }
        Ok(())
    }
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorSpec>,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: None,
            commands: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: impl Into<ColorSpec>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn push(&mut self, command: DrawCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(
            "loaded scene {:?} from {} ({} commands)",
            scene.name,
            path.display(),
            scene.commands.len()
        );
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!("saved scene {:?} to {}", self.name, path.display());
        Ok(())
    }

    /// Check every color, then clear to the background and run each
    /// command in order. An invalid color fails before anything is drawn.
    pub fn render(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let background = self.background.as_ref().map(ColorSpec::to_pixel).transpose()?;
        for command in &self.commands {
            command.color().to_pixel()?;
        }

        if let Some(bg) = background {
            buffer.clear(bg);
        }
        for command in &self.commands {
            command.apply(buffer)?;
        }
        Ok(())
    }

    /// Like [`Scene::render`], but commands with an invalid color are
    /// skipped with a warning. Returns how many were skipped.
    pub fn render_lossy(&self, buffer: &mut PixelBuffer) -> usize {
        match self.background.as_ref().map(ColorSpec::to_pixel) {
            Some(Ok(bg)) => buffer.clear(bg),
            Some(Err(e)) => warn!("scene {:?}: ignoring background: {}", self.name, e),
            None => {},
        }

        let mut skipped = 0;
        for (i, command) in self.commands.iter().enumerate() {
            if let Err(e) = command.apply(buffer) {
                warn!("scene {:?}: skipping command {}: {}", self.name, i, e);
                skipped += 1;
            }
        }
        skipped
    }

    /// Render into a fresh buffer of the scene's size
    pub fn render_new(&self) -> Result<PixelBuffer<'static>> {
        let mut buffer = PixelBuffer::new(self.width, self.height)?;
        self.render(&mut buffer)?;
        Ok(buffer)
    }
}
