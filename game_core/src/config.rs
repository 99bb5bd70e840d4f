use crate::{Params, Side};
use glam::Vec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub misalign_chance: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_growth: f32,
    /// Gap left between a paddle face and the ball after a hit
    pub ball_snap_margin: f32,
    pub countdown_ms: i32,
    /// Baseline of the score text
    pub score_y: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            misalign_chance: Params::MISALIGN_CHANCE,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_growth: Params::BALL_SPEED_GROWTH,
            ball_snap_margin: Params::BALL_SNAP_MARGIN,
            countdown_ms: Params::COUNTDOWN_MS,
            score_y: Params::SCORE_Y,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// X position of a paddle's left face
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => Params::PADDLE_MARGIN_LEFT,
            Side::Right => self.screen_width - Params::PADDLE_MARGIN_RIGHT,
        }
    }

    /// Starting Y (top edge) shared by both paddles: vertically centred
    pub fn paddle_start_y(&self) -> f32 {
        self.screen_height / 2.0 - self.paddle_height / 2.0
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}
