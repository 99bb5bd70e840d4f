//! Half-block terminal canvas
//!
//! Every terminal cell shows two square-ish "pixels" (upper and lower half
//! block), so the court keeps its 4:3 look on a character grid. Text is an
//! overlay on top of the pixel layer.

use crate::error::TerminalError;
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crossterm::{
    cursor, queue,
    style::{self, Color as TermColor},
    terminal,
};
use game_core::{Aabb, Canvas, Color, FontSize, Params};
use glam::Vec2;
use std::io::{self, Stdout, Write};

const UPPER_HALF: char = '\u{2580}';

const INTRO_LINES: [&str; 6] = [
    "P O N G",
    "",
    "SPACE      start",
    "UP / DOWN  move",
    "R          reset",
    "Q          quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Color,
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    follow_terminal: bool,
    background: Color,
    px: Vec<Color>,
    text: Vec<Option<Glyph>>,
}

impl TerminalCanvas<Stdout> {
    /// Canvas on stdout that tracks terminal resizes between frames
    pub fn stdout() -> Result<Self, TerminalError> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::new(io::stdout(), cols, rows);
        canvas.follow_terminal = true;
        Ok(canvas)
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let mut canvas = Self {
            out,
            cols: 0,
            rows: 0,
            follow_terminal: false,
            background: Color::BACKGROUND,
            px: Vec::new(),
            text: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = usize::from(cols);
        self.rows = usize::from(rows);
        self.px = vec![self.background; self.cols * self.pixel_height()];
        self.text = vec![None; self.cols * self.rows];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols as u16, self.rows as u16)
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    /// Court units to pixels. Multiplies before dividing so whole-unit
    /// positions land exactly on pixel edges.
    fn to_pixels(&self, v: Vec2) -> Vec2 {
        v * Vec2::new(self.cols as f32, self.pixel_height() as f32)
            / Vec2::new(Params::SCREEN_WIDTH, Params::SCREEN_HEIGHT)
    }

    fn pixel(&self, x: usize, y: usize) -> Color {
        self.px[y * self.cols + x]
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.pixel_height() {
            let idx = y as usize * self.cols + x as usize;
            self.px[idx] = color;
        }
    }

    fn fill_pixels(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    fn glyph_at(&self, col: usize, row: usize) -> Option<Glyph> {
        self.text[row * self.cols + col]
    }

    /// Write `line` centred on column `col` of text row `row`, clipped
    fn put_line(&mut self, line: &str, col: i32, row: i32, color: Color) {
        if row < 0 || row as usize >= self.rows {
            return;
        }
        let len = line.chars().count() as i32;
        let start = col - len / 2;
        for (i, ch) in line.chars().enumerate() {
            let c = start + i as i32;
            if c >= 0 && (c as usize) < self.cols {
                let idx = row as usize * self.cols + c as usize;
                self.text[idx] = Some(Glyph { ch, color });
            }
        }
    }

    /// Digits in the block font, centred on pixel (`cx`, `cy`)
    fn put_big_digits(&mut self, digits: &str, cx: i32, cy: i32, color: Color) {
        let k = (self.pixel_height() / 48).max(1) as i32;
        let n = digits.chars().count() as i32;
        let width = (n * (GLYPH_WIDTH as i32 + 1) - 1) * k;
        let height = GLYPH_HEIGHT as i32 * k;
        let mut x = cx - width / 2;
        let y = cy - height / 2;

        for ch in digits.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (gy, row) in rows.iter().enumerate() {
                    for (gx, bit) in row.chars().enumerate() {
                        if bit == '#' {
                            self.fill_pixels(x + gx as i32 * k, y + gy as i32 * k, k, k, color);
                        }
                    }
                }
            }
            x += (GLYPH_WIDTH as i32 + 1) * k;
        }
    }

    fn sync_size(&mut self) -> Result<(), TerminalError> {
        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            if (cols, rows) != self.size() {
                tracing::debug!(cols, rows, "terminal resized");
                self.resize(cols, rows);
                queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
            }
        }
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    type Error = TerminalError;

    fn clear(&mut self, color: Color) -> Result<(), TerminalError> {
        self.sync_size()?;
        self.background = color;
        self.px.fill(color);
        self.text.fill(None);
        Ok(())
    }

    fn draw_intro(&mut self) -> Result<(), TerminalError> {
        let col = self.cols as i32 / 2;
        let top = self.rows as i32 / 2 - INTRO_LINES.len() as i32 / 2;
        for (i, line) in INTRO_LINES.iter().enumerate() {
            self.put_line(line, col, top + i as i32, Color::WHITE);
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Aabb, color: Color) -> Result<(), TerminalError> {
        let min = self.to_pixels(rect.min);
        let max = self.to_pixels(rect.max);
        let x0 = min.x.floor() as i32;
        let y0 = min.y.floor() as i32;
        let x1 = (max.x.ceil() as i32).max(x0 + 1);
        let y1 = (max.y.ceil() as i32).max(y0 + 1);
        self.fill_pixels(x0, y0, x1 - x0, y1 - y0, color);
        Ok(())
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), TerminalError> {
        let c = self.to_pixels(center);
        let r = self.to_pixels(Vec2::splat(radius));

        let x0 = (c.x - r.x).floor() as i32;
        let x1 = (c.x + r.x).ceil() as i32;
        let y0 = (c.y - r.y).floor() as i32;
        let y1 = (c.y + r.y).ceil() as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                let d = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - c) / r.max(Vec2::splat(0.5));
                if d.length_squared() <= 1.0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
        // A ball smaller than a pixel still shows up
        self.set_pixel(c.x.floor() as i32, c.y.floor() as i32, color);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        size: FontSize,
        color: Color,
        center: Vec2,
    ) -> Result<(), TerminalError> {
        let p = self.to_pixels(center);
        match size {
            FontSize::Large if text.chars().all(|c| c.is_ascii_digit()) => {
                self.put_big_digits(text, p.x.round() as i32, p.y.round() as i32, color);
            }
            _ => {
                self.put_line(text, p.x.round() as i32, (p.y / 2.0) as i32, color);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), TerminalError> {
        for row in 0..self.rows {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            let mut fg = None;
            let mut bg = None;

            for col in 0..self.cols {
                let top = self.pixel(col, row * 2);
                let bottom = self.pixel(col, row * 2 + 1);
                let (ch, want_fg, want_bg) = match self.glyph_at(col, row) {
                    Some(glyph) => (glyph.ch, glyph.color, self.background),
                    None => (UPPER_HALF, top, bottom),
                };
                if fg != Some(want_fg) {
                    queue!(self.out, style::SetForegroundColor(term_color(want_fg)))?;
                    fg = Some(want_fg);
                }
                if bg != Some(want_bg) {
                    queue!(self.out, style::SetBackgroundColor(term_color(want_bg)))?;
                    bg = Some(want_bg);
                }
                queue!(self.out, style::Print(ch))?;
            }
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
