/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen (logical pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 7.0; // pixels per tick
    pub const PADDLE_MARGIN_LEFT: f32 = 30.0;
    pub const PADDLE_MARGIN_RIGHT: f32 = 40.0; // measured from the right edge to the paddle's left face
    pub const MISALIGN_CHANCE: f32 = 0.33;

    // Ball
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_SPEED_INITIAL: f32 = 5.0; // pixels per tick, per axis
    pub const BALL_SPEED_GROWTH: f32 = 1.042; // applied on every reset after the first
    pub const BALL_SNAP_MARGIN: f32 = 1.0;

    // Round
    pub const COUNTDOWN_MS: i32 = 3000;

    // Loop
    pub const TICK_RATE: u32 = 60;

    // Presentation anchors
    pub const SCORE_Y: f32 = 50.0;
}
