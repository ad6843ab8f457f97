use super::Demo;
use crate::color::{make_color, BLACK, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW};
use crate::display::{
    draw_char, draw_text, draw_text_centered, text_height, text_width, InputEvent, PixelBuffer,
    FIRST_CHAR, GLYPH_HEIGHT, GLYPH_WIDTH, LAST_CHAR,
};
use crate::util::hsv_to_pixel;

const CHARS_PER_ROW: i32 = 16;
const CROSSHAIR: i32 = 6;
const CENTERED: &str = "Centered Text Example";

/// Bitmap font showcase: coloured lines, the full character set, a boxed
/// centered label and a crosshair that follows the mouse
pub struct TextDemo {
    mouse: (i32, i32),
    fps: f32,
}

impl TextDemo {
    pub fn new() -> Self {
        Self {
            mouse: (0, 0),
            fps: 0.0,
        }
    }

    fn draw_charset(buffer: &mut PixelBuffer, x: i32, y: i32) {
        let cell_w = GLYPH_WIDTH + 2;
        let cell_h = GLYPH_HEIGHT + 2;
        for (i, c) in (FIRST_CHAR..=LAST_CHAR).enumerate() {
            let i = i as i32;
            let cx = x + (i % CHARS_PER_ROW) * cell_w;
            let cy = y + (i / CHARS_PER_ROW) * cell_h;
            let hue = i as f32 * 360.0 / CHARS_PER_ROW as f32;
            draw_char(buffer, cx, cy, c, hsv_to_pixel(hue, 0.45, 1.0));
        }
    }
}

impl Default for TextDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for TextDemo {
    fn update(&mut self, dt: f32, _width: u32, _height: u32) {
        if dt <= 0.0 {
            return;
        }
        let instant = 1.0 / dt;
        self.fps = if self.fps == 0.0 {
            instant
        } else {
            self.fps * 0.9 + instant * 0.1
        };
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        let w = buffer.width() as i32;
        let h = buffer.height() as i32;
        buffer.clear(BLACK);

        draw_text_centered(buffer, w / 2, 16, "FINCH BITMAP FONT", WHITE);

        let lines = [
            ("Red text", RED),
            ("Green text", GREEN),
            ("Yellow text", YELLOW),
            ("Cyan text", CYAN),
            ("Magenta text", MAGENTA),
        ];
        for (i, (text, color)) in lines.iter().enumerate() {
            draw_text(buffer, 10, 36 + i as i32 * 12, text, *color);
        }

        let fps = format!("FPS: {:.0}", self.fps);
        draw_text(buffer, w - text_width(&fps) - 10, 10, &fps, YELLOW);

        let (mx, my) = self.mouse;
        let mouse = format!("Mouse: ({}, {})", mx, my);
        draw_text(buffer, 10, 100, &mouse, WHITE);
        buffer.hline(mx - CROSSHAIR, mx + CROSSHAIR, my, RED);
        buffer.vline(mx, my - CROSSHAIR, my + CROSSHAIR, RED);

        Self::draw_charset(buffer, 10, 120);

        let cy = h * 3 / 4;
        draw_text_centered(buffer, w / 2, cy, CENTERED, WHITE);
        let half_w = text_width(CENTERED) / 2 + 6;
        let half_h = text_height() / 2 + 6;
        buffer.draw_rect(w / 2 - half_w, cy - half_h, w / 2 + half_w, cy + half_h, GREEN);

        draw_text(buffer, 10, h - 14, "Move the mouse, ESC to quit", make_color(128, 128, 128));
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let Some(position) = event.position() {
            self.mouse = position;
        }
    }

    fn name(&self) -> &str {
        "text"
    }
}
