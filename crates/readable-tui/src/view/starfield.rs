use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::theme::Theme;

/// Roughly one cell in this many gets a star.
const DENSITY: u32 = 29;

const GLYPHS: [&str; 3] = ["\u{00B7}", "\u{2022}", "\u{2726}"];

/// Sprinkle stars into the blank background cells of `area`. Text, the gaps
/// between words and tinted blocks are left alone. No-op for themes without a
/// starfield.
///
/// Placement depends only on the cell position; `tick` only makes a few
/// stars twinkle.
pub fn render(buf: &mut Buffer, area: Rect, theme: &Theme, tick: usize) {
    let Some((faint, bright)) = theme.stars else {
        return;
    };
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let h = cell_hash(x, y);
            if h % DENSITY != 0 {
                continue;
            }
            if !is_open_sky(buf, area, x, y, theme.bg) {
                continue;
            }
            let cell = &mut buf[(x, y)];
            let glyph = GLYPHS[(h / DENSITY % 7).min(2) as usize];
            let twinkle = (h as usize).wrapping_add(tick / 8) % 5 == 0;
            cell.set_symbol(glyph);
            cell.set_fg(if twinkle || glyph == GLYPHS[2] { bright } else { faint });
        }
    }
}

fn is_open_sky(buf: &Buffer, area: Rect, x: u16, y: u16, bg: Color) -> bool {
    let blank = |x: u16| {
        let cell = &buf[(x, y)];
        cell.symbol() == " " && (cell.bg == bg || cell.bg == Color::Reset)
    };
    blank(x)
        && (x == area.left() || blank(x - 1))
        && (x + 1 >= area.right() || blank(x + 1))
}

fn cell_hash(x: u16, y: u16) -> u32 {
    let mut h = (u32::from(x) << 16 | u32::from(y)).wrapping_mul(0x9E37_79B1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85EB_CA77);
    h ^ (h >> 13)
}
