//! Fixed 8x8 bitmap font covering printable ASCII

use super::PixelBuffer;
use crate::color::Pixel;

pub const GLYPH_WIDTH: i32 = 8;
pub const GLYPH_HEIGHT: i32 = 8;
pub const FIRST_CHAR: char = ' ';
pub const LAST_CHAR: char = '~';

const GLYPH_COUNT: usize = LAST_CHAR as usize - FIRST_CHAR as usize + 1;

/// One byte per row, most significant bit is the leftmost pixel
static FONT: [[u8; 8]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x00], // '!'
    [0x6C, 0x6C, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x6C, 0x6C, 0xFE, 0x6C, 0xFE, 0x6C, 0x6C, 0x00], // '#'
    [0x18, 0x7E, 0xC0, 0x7C, 0x06, 0xFC, 0x18, 0x00], // '$'
    [0x00, 0xC6, 0xCC, 0x18, 0x30, 0x66, 0xC6, 0x00], // '%'
    [0x38, 0x6C, 0x38, 0x76, 0xDC, 0xCC, 0x76, 0x00], // '&'
    [0x18, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00], // '('
    [0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00], // ')'
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00], // '*'
    [0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30], // ','
    [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00], // '.'
    [0x06, 0x0C, 0x18, 0x30, 0x60, 0xC0, 0x80, 0x00], // '/'
    [0x7C, 0xCE, 0xDE, 0xF6, 0xE6, 0xC6, 0x7C, 0x00], // '0'
    [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00], // '1'
    [0x7C, 0xC6, 0x06, 0x7C, 0xC0, 0xC0, 0xFE, 0x00], // '2'
    [0xFC, 0x06, 0x06, 0x3C, 0x06, 0x06, 0xFC, 0x00], // '3'
    [0x0C, 0xCC, 0xCC, 0xCC, 0xFE, 0x0C, 0x0C, 0x00], // '4'
    [0xFE, 0xC0, 0xFC, 0x06, 0x06, 0xC6, 0x7C, 0x00], // '5'
    [0x7C, 0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0x7C, 0x00], // '6'
    [0xFE, 0x06, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x00], // '7'
    [0x7C, 0xC6, 0xC6, 0x7C, 0xC6, 0xC6, 0x7C, 0x00], // '8'
    [0x7C, 0xC6, 0xC6, 0x7E, 0x06, 0x06, 0x7C, 0x00], // '9'
    [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00], // ':'
    [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30], // ';'
    [0x0C, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0C, 0x00], // '<'
    [0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00, 0x00], // '='
    [0x30, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x30, 0x00], // '>'
    [0x3C, 0x66, 0x0C, 0x18, 0x18, 0x00, 0x18, 0x00], // '?'
    [0x7C, 0xC6, 0xDE, 0xDE, 0xDE, 0xC0, 0x7E, 0x00], // '@'
    [0x38, 0x6C, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0x00], // 'A'
    [0xFC, 0xC6, 0xC6, 0xFC, 0xC6, 0xC6, 0xFC, 0x00], // 'B'
    [0x7C, 0xC6, 0xC0, 0xC0, 0xC0, 0xC6, 0x7C, 0x00], // 'C'
    [0xF8, 0xCC, 0xC6, 0xC6, 0xC6, 0xCC, 0xF8, 0x00], // 'D'
    [0xFE, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xFE, 0x00], // 'E'
    [0xFE, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xC0, 0x00], // 'F'
    [0x7C, 0xC6, 0xC0, 0xCE, 0xC6, 0xC6, 0x7C, 0x00], // 'G'
    [0xC6, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0xC6, 0x00], // 'H'
    [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00], // 'I'
    [0x06, 0x06, 0x06, 0x06, 0xC6, 0xC6, 0x7C, 0x00], // 'J'
    [0xC6, 0xCC, 0xD8, 0xF0, 0xD8, 0xCC, 0xC6, 0x00], // 'K'
    [0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xFE, 0x00], // 'L'
    [0xC6, 0xEE, 0xFE, 0xD6, 0xC6, 0xC6, 0xC6, 0x00], // 'M'
    [0xC6, 0xE6, 0xF6, 0xDE, 0xCE, 0xC6, 0xC6, 0x00], // 'N'
    [0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0x00], // 'O'
    [0xFC, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0, 0xC0, 0x00], // 'P'
    [0x7C, 0xC6, 0xC6, 0xC6, 0xD6, 0xDE, 0x7C, 0x06], // 'Q'
    [0xFC, 0xC6, 0xC6, 0xFC, 0xD8, 0xCC, 0xC6, 0x00], // 'R'
    [0x7C, 0xC6, 0xC0, 0x7C, 0x06, 0xC6, 0x7C, 0x00], // 'S'
    [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00], // 'T'
    [0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0x00], // 'U'
    [0xC6, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x10, 0x00], // 'V'
    [0xC6, 0xC6, 0xC6, 0xD6, 0xFE, 0xEE, 0xC6, 0x00], // 'W'
    [0xC6, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0xC6, 0x00], // 'X'
    [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00], // 'Y'
    [0xFE, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFE, 0x00], // 'Z'
    [0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0x00], // '['
    [0xC0, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x02, 0x00], // '\\'
    [0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0x00], // ']'
    [0x10, 0x38, 0x6C, 0xC6, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFE], // '_'
    [0x18, 0x18, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x7C, 0x06, 0x7E, 0xC6, 0x7E, 0x00], // 'a'
    [0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xC6, 0xFC, 0x00], // 'b'
    [0x00, 0x00, 0x7C, 0xC6, 0xC0, 0xC6, 0x7C, 0x00], // 'c'
    [0x06, 0x06, 0x7E, 0xC6, 0xC6, 0xC6, 0x7E, 0x00], // 'd'
    [0x00, 0x00, 0x7C, 0xC6, 0xFE, 0xC0, 0x7C, 0x00], // 'e'
    [0x1C, 0x30, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x00], // 'f'
    [0x00, 0x00, 0x7E, 0xC6, 0xC6, 0x7E, 0x06, 0x7C], // 'g'
    [0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xC6, 0xC6, 0x00], // 'h'
    [0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x3C, 0x00], // 'i'
    [0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x18, 0x70], // 'j'
    [0xC0, 0xC0, 0xC6, 0xCC, 0xF8, 0xCC, 0xC6, 0x00], // 'k'
    [0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00], // 'l'
    [0x00, 0x00, 0xEC, 0xFE, 0xD6, 0xC6, 0xC6, 0x00], // 'm'
    [0x00, 0x00, 0xFC, 0xC6, 0xC6, 0xC6, 0xC6, 0x00], // 'n'
    [0x00, 0x00, 0x7C, 0xC6, 0xC6, 0xC6, 0x7C, 0x00], // 'o'
    [0x00, 0x00, 0xFC, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0], // 'p'
    [0x00, 0x00, 0x7E, 0xC6, 0xC6, 0x7E, 0x06, 0x06], // 'q'
    [0x00, 0x00, 0xDC, 0xE6, 0xC0, 0xC0, 0xC0, 0x00], // 'r'
    [0x00, 0x00, 0x7E, 0xC0, 0x7C, 0x06, 0xFC, 0x00], // 's'
    [0x30, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x1C, 0x00], // 't'
    [0x00, 0x00, 0xC6, 0xC6, 0xC6, 0xC6, 0x7E, 0x00], // 'u'
    [0x00, 0x00, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x00], // 'v'
    [0x00, 0x00, 0xC6, 0xC6, 0xD6, 0xFE, 0x6C, 0x00], // 'w'
    [0x00, 0x00, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0x00], // 'x'
    [0x00, 0x00, 0xC6, 0xC6, 0xC6, 0x7E, 0x06, 0x7C], // 'y'
    [0x00, 0x00, 0xFE, 0x0C, 0x38, 0x60, 0xFE, 0x00], // 'z'
    [0x0E, 0x18, 0x18, 0x70, 0x18, 0x18, 0x0E, 0x00], // '{'
    [0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00], // '|'
    [0x70, 0x18, 0x18, 0x0E, 0x18, 0x18, 0x70, 0x00], // '}'
    [0x72, 0x9C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '~'
];

/// Bitmap rows for `c`, or `None` outside `' '..='~'`
pub fn glyph(c: char) -> Option<&'static [u8; 8]> {
    if !(FIRST_CHAR..=LAST_CHAR).contains(&c) {
        return None;
    }
    FONT.get(c as usize - FIRST_CHAR as usize)
}

/// Draw one glyph with its top-left corner at (x, y). Set bits overwrite
/// the destination, clear bits are left alone; unsupported characters draw
/// nothing.
pub fn draw_char(buffer: &mut PixelBuffer, x: i32, y: i32, c: char, color: Pixel) {
    let Some(rows) = glyph(c) else {
        return;
    };
    for (row, &bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (0x80 >> col) != 0 {
                buffer.set_pixel(x.saturating_add(col), y.saturating_add(row as i32), color);
            }
        }
    }
}

/// Draw `text` left to right from (x, y), one glyph cell per character.
/// Unsupported characters leave a blank cell.
pub fn draw_text(buffer: &mut PixelBuffer, x: i32, y: i32, text: &str, color: Pixel) {
    let mut cx = x;
    for c in text.chars() {
        draw_char(buffer, cx, y, c, color);
        cx = cx.saturating_add(GLYPH_WIDTH);
    }
}

/// Draw `text` so its bounding box is centered on (cx, cy)
pub fn draw_text_centered(buffer: &mut PixelBuffer, cx: i32, cy: i32, text: &str, color: Pixel) {
    let x = cx.saturating_sub(text_width(text) / 2);
    let y = cy.saturating_sub(text_height() / 2);
    draw_text(buffer, x, y, text, color);
}

/// Width in pixels of `text`: characters times the glyph width
pub fn text_width(text: &str) -> i32 {
    let count = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    count.saturating_mul(GLYPH_WIDTH)
}

pub fn text_height() -> i32 {
    GLYPH_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, RED, WHITE};

    fn canvas(w: u32, h: u32) -> PixelBuffer<'static> {
        let mut buf = PixelBuffer::new(w, h).unwrap();
        buf.clear(BLACK);
        buf
    }

    fn lit(buf: &PixelBuffer) -> usize {
        buf.pixels().iter().filter(|&&p| p != BLACK).count()
    }

    #[test]
    fn test_glyph_range() {
        assert!(glyph(' ').is_some());
        assert!(glyph('~').is_some());
        assert!(glyph('\x1f').is_none());
        assert!(glyph('\x7f').is_none());
        assert!(glyph('é').is_none());
        assert_eq!(glyph(' '), Some(&[0u8; 8]));
    }

    #[test]
    fn test_draw_char_msb_is_left() {
        let mut buf = canvas(8, 8);
        draw_char(&mut buf, 0, 0, '!', WHITE);
        // '!' is a two pixel wide bar in columns 3 and 4
        assert_eq!(buf.get_pixel(3, 0), WHITE);
        assert_eq!(buf.get_pixel(4, 0), WHITE);
        assert_eq!(buf.get_pixel(2, 0), BLACK);
        assert_eq!(buf.get_pixel(5, 0), BLACK);
        assert_eq!(buf.get_pixel(3, 5), BLACK);
        assert_eq!(buf.get_pixel(3, 6), WHITE);
    }

    #[test]
    fn test_draw_char_overwrites_and_clips() {
        let mut buf = canvas(6, 6);
        draw_char(&mut buf, -4, -4, '#', 0x00FF0000);
        assert!(buf.pixels().iter().any(|&p| p == 0x00FF0000));
        draw_char(&mut buf, 3, 3, '\n', WHITE);
        assert_eq!(buf.pixels().iter().filter(|&&p| p == WHITE).count(), 0);
    }

    #[test]
    fn test_text_advances_past_unsupported() {
        let mut a = canvas(40, 8);
        let mut b = canvas(40, 8);
        draw_text(&mut a, 0, 0, "A\tB", RED);
        draw_char(&mut b, 0, 0, 'A', RED);
        draw_char(&mut b, 16, 0, 'B', RED);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut buf = canvas(16, 16);
        draw_text(&mut buf, 0, 0, "", WHITE);
        draw_text_centered(&mut buf, 8, 8, "", WHITE);
        assert_eq!(lit(&buf), 0);
    }

    #[test]
    fn test_metrics() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("Hello"), 40);
        assert_eq!(text_width("héllo"), 40);
        assert_eq!(text_height(), 8);
    }

    #[test]
    fn test_centered_matches_offset_text() {
        let mut a = canvas(64, 32);
        let mut b = canvas(64, 32);
        draw_text_centered(&mut a, 32, 16, "abc", WHITE);
        draw_text(&mut b, 32 - 12, 16 - 4, "abc", WHITE);
        assert_eq!(a.pixels(), b.pixels());
        assert!(lit(&a) > 0);
    }
}
