//! Render pass
//!
//! The simulation never draws directly. Each tick it walks the current
//! state and issues primitive draw calls to a [`Canvas`] supplied by the
//! front-end.

use crate::{Aabb, Game, Randomness, Side};
use glam::Vec2;

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// grey12
    pub const BACKGROUND: Color = Color::rgb(31, 31, 31);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// Countdown digit
    Large,
    /// Scores
    Small,
}

/// Abstract drawing surface
pub trait Canvas {
    type Error: std::error::Error + Send + Sync + 'static;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;
    /// Full-screen title card shown while idle
    fn draw_intro(&mut self) -> Result<(), Self::Error>;
    fn draw_rect(&mut self, rect: Aabb, color: Color) -> Result<(), Self::Error>;
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), Self::Error>;
    /// Draw `text` centred on `center`
    fn draw_text(
        &mut self,
        text: &str,
        size: FontSize,
        color: Color,
        center: Vec2,
    ) -> Result<(), Self::Error>;
    /// Show the finished frame
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Draw one frame of `game`
pub fn render<R, C>(game: &Game<R>, canvas: &mut C) -> Result<(), C::Error>
where
    R: Randomness,
    C: Canvas + ?Sized,
{
    canvas.clear(Color::BACKGROUND)?;

    if !game.game_active() {
        canvas.draw_intro()?;
    } else {
        for side in [Side::Left, Side::Right] {
            if let Some(paddle) = game.paddle(side) {
                canvas.draw_rect(paddle.bounds(), Color::WHITE)?;
            }
        }
        if let Some(ball) = game.ball() {
            canvas.draw_circle(ball.pos, ball.radius, Color::WHITE)?;
        }
    }

    if game.countdown_active() {
        if let Some(digit) = game.countdown.display_number() {
            let anchor = Vec2::new(game.map.width / 2.0, game.map.height / 4.0);
            canvas.draw_text(&digit.to_string(), FontSize::Large, Color::WHITE, anchor)?;
        }
    }

    let left_anchor = Vec2::new(game.map.width / 4.0, game.config.score_y);
    let right_anchor = Vec2::new(3.0 * game.map.width / 4.0, game.config.score_y);
    canvas.draw_text(
        &game.score.left.to_string(),
        FontSize::Small,
        Color::WHITE,
        left_anchor,
    )?;
    canvas.draw_text(
        &game.score.right.to_string(),
        FontSize::Small,
        Color::WHITE,
        right_anchor,
    )?;

    canvas.present()
}
