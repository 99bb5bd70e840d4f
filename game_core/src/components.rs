use crate::{Aabb, Config, Randomness};
use glam::Vec2;
use tracing::debug;

/// Which half of the court something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2, // Top-left corner
    pub size: Vec2,
    pub speed: f32, // Pixels per tick
    pub misalign_chance: f32,
}

impl Paddle {
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            pos: Vec2::new(config.paddle_x(side), config.paddle_start_y()),
            size: Vec2::new(config.paddle_width, config.paddle_height),
            speed: config.paddle_speed,
            misalign_chance: config.misalign_chance,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner_size(self.pos, self.size)
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Move up by `speed`, stopping at the top edge
    pub fn move_up(&mut self, screen_height: f32) {
        self.pos.y = (self.pos.y - self.speed).clamp(0.0, self.max_y(screen_height));
    }

    /// Move down by `speed`, stopping at the bottom edge
    pub fn move_down(&mut self, screen_height: f32) {
        self.pos.y = (self.pos.y + self.speed).clamp(0.0, self.max_y(screen_height));
    }

    /// Apply a direction: -1 = up, 1 = down, anything else = stay
    pub fn step(&mut self, dir: i8, screen_height: f32) {
        match dir {
            -1 => self.move_up(screen_height),
            1 => self.move_down(screen_height),
            _ => {}
        }
    }

    /// Autonomous policy: with `misalign_chance` make a random move,
    /// otherwise chase the ball's y. Returns the direction taken.
    pub fn auto_move<R: Randomness + ?Sized>(
        &mut self,
        ball_y: f32,
        screen_height: f32,
        rng: &mut R,
    ) -> i8 {
        let dir = if rng.chance(self.misalign_chance) {
            rng.pick_move()
        } else {
            let center = self.center_y();
            if center < ball_y {
                1
            } else if center > ball_y {
                -1
            } else {
                0
            }
        };
        self.step(dir, screen_height);
        dir
    }

    fn max_y(&self, screen_height: f32) -> f32 {
        (screen_height - self.size.y).max(0.0)
    }
}

/// Marks the paddle driven by the autonomous policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

/// Marks the paddle driven by held keys
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanControlled;

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: i8, // -1 = up, 0 = stop, 1 = down
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the ball touched during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallContact {
    pub wall: bool,
    pub paddle: Option<Side>,
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-axis speed magnitude; `None` until the first reset, which
    /// seeds it with `initial_speed`
    pub base_speed: Option<f32>,
    pub initial_speed: f32,
    pub growth: f32,
    pub snap_margin: f32,
}

impl Ball {
    /// A ball in flight with the default tuning
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            ..Self::from_config(&Config::default())
        }
    }

    /// An unlaunched ball; call [`Ball::reset`] before play
    pub fn from_config(config: &Config) -> Self {
        Self {
            pos: config.screen_center(),
            vel: Vec2::ZERO,
            radius: config.ball_radius,
            base_speed: None,
            initial_speed: config.ball_speed_initial,
            growth: config.ball_speed_growth,
            snap_margin: config.ball_snap_margin,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Advance one tick, bouncing off the top/bottom edges and the paddles.
    ///
    /// Paddle hits reverse horizontal travel and snap the ball just outside
    /// the paddle face so the same hit cannot register on the next tick.
    /// The left paddle is checked first; the paddle's hit point never
    /// changes the vertical speed.
    pub fn update(&mut self, left: &Paddle, right: &Paddle, screen_height: f32) -> BallContact {
        let mut contact = BallContact::default();
        self.pos += self.vel;

        if self.pos.y - self.radius <= 0.0 && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            contact.wall = true;
        } else if self.pos.y + self.radius >= screen_height && self.vel.y > 0.0 {
            self.vel.y = -self.vel.y;
            contact.wall = true;
        }

        let ball_box = self.bounds();
        if ball_box.overlaps(&left.bounds()) {
            self.vel.x = self.vel.x.abs();
            self.pos.x = left.pos.x + left.size.x + self.radius + self.snap_margin;
            contact.paddle = Some(Side::Left);
        } else if ball_box.overlaps(&right.bounds()) {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = right.pos.x - self.radius - self.snap_margin;
            contact.paddle = Some(Side::Right);
        }

        contact
    }

    /// Recenter at `center`, grow the base speed (first call seeds it) and
    /// pick a fresh direction independently on each axis.
    pub fn reset<R: Randomness + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        let speed = match self.base_speed {
            None => self.initial_speed,
            Some(previous) => previous * self.growth,
        };
        self.base_speed = Some(speed);
        self.pos = center;

        let vx = if rng.coin_flip() { speed } else { -speed };
        let vy = if rng.coin_flip() { speed } else { -speed };
        self.vel = Vec2::new(vx, vy);
        debug!(speed, vx, vy, "ball reset");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays fixed answers; panics if a test asks for more than it scripted
    #[derive(Default)]
    pub(crate) struct ScriptedRng {
        pub chances: VecDeque<bool>,
        pub moves: VecDeque<i8>,
        pub coins: VecDeque<bool>,
    }

    impl ScriptedRng {
        pub fn with_coins(coins: &[bool]) -> Self {
            Self {
                coins: coins.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Randomness for ScriptedRng {
        fn chance(&mut self, _p: f32) -> bool {
            self.chances.pop_front().expect("unscripted chance()")
        }

        fn pick_move(&mut self) -> i8 {
            self.moves.pop_front().expect("unscripted pick_move()")
        }

        fn coin_flip(&mut self) -> bool {
            self.coins.pop_front().expect("unscripted coin_flip()")
        }
    }

    fn paddles(config: &Config) -> (Paddle, Paddle) {
        (Paddle::new(Side::Left, config), Paddle::new(Side::Right, config))
    }

    #[test]
    fn test_paddle_starts_centred() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        assert_eq!(left.pos, Vec2::new(30.0, 250.0));
        assert_eq!(right.pos, Vec2::new(760.0, 250.0));
    }

    #[test]
    fn test_paddle_stays_on_screen_for_any_sequence() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Right, &config);
        let mut rng = crate::GameRng::new(99);

        for _ in 0..5_000 {
            if rng.coin_flip() {
                paddle.move_up(config.screen_height);
            } else {
                paddle.move_down(config.screen_height);
            }
            assert!(
                paddle.pos.y >= 0.0 && paddle.pos.y <= config.screen_height - config.paddle_height,
                "Paddle left the screen at y={}",
                paddle.pos.y
            );
        }
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Left, &config);
        for _ in 0..100 {
            paddle.move_up(config.screen_height);
        }
        assert_eq!(paddle.pos.y, 0.0);
        for _ in 0..100 {
            paddle.move_down(config.screen_height);
        }
        assert_eq!(paddle.pos.y, config.screen_height - config.paddle_height);
    }

    #[test]
    fn test_auto_move_tracks_ball_when_aligned() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Left, &config);
        let mut rng = ScriptedRng {
            chances: VecDeque::from(vec![false, false, false]),
            ..ScriptedRng::default()
        };

        assert_eq!(paddle.auto_move(500.0, config.screen_height, &mut rng), 1);
        assert_eq!(paddle.pos.y, 257.0);
        assert_eq!(paddle.auto_move(10.0, config.screen_height, &mut rng), -1);
        assert_eq!(paddle.pos.y, 250.0);
        assert_eq!(paddle.auto_move(300.0, config.screen_height, &mut rng), 0);
        assert_eq!(paddle.pos.y, 250.0, "Centred on the ball: stay put");
    }

    #[test]
    fn test_auto_move_random_ignores_ball() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Left, &config);
        let mut rng = ScriptedRng {
            chances: VecDeque::from(vec![true, true, true]),
            moves: VecDeque::from(vec![-1, 0, 1]),
            ..ScriptedRng::default()
        };

        // Ball far below, but the misaligned move goes up anyway
        assert_eq!(paddle.auto_move(590.0, config.screen_height, &mut rng), -1);
        assert_eq!(paddle.pos.y, 243.0);
        assert_eq!(paddle.auto_move(590.0, config.screen_height, &mut rng), 0);
        assert_eq!(paddle.pos.y, 243.0);
        assert_eq!(paddle.auto_move(590.0, config.screen_height, &mut rng), 1);
        assert_eq!(paddle.pos.y, 250.0);
    }

    #[test]
    fn test_auto_move_misaligns_about_a_third_of_the_time() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Left, &config);
        let mut rng = crate::GameRng::new(2024);

        // Ball pinned to the paddle centre: tracking never moves, so every
        // move comes from a misaligned tick picking up or down.
        let mut moved = 0;
        let trials = 30_000;
        for _ in 0..trials {
            paddle.pos.y = config.paddle_start_y();
            if paddle.auto_move(300.0, config.screen_height, &mut rng) != 0 {
                moved += 1;
            }
        }
        let ratio = moved as f32 / trials as f32;
        let expected = config.misalign_chance * 2.0 / 3.0;
        assert!(
            (ratio - expected).abs() < 0.02,
            "Expected ~{expected}, got {ratio}"
        );
    }

    #[test]
    fn test_ball_first_reset_uses_initial_speed() {
        let config = Config::new();
        let mut ball = Ball::from_config(&config);
        let mut rng = ScriptedRng::with_coins(&[true, false]);

        ball.reset(Vec2::new(400.0, 300.0), &mut rng);

        assert_eq!(ball.base_speed, Some(5.0));
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ball.vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_ball_speed_compounds_on_every_reset() {
        let config = Config::new();
        let mut ball = Ball::from_config(&config);
        let mut rng = crate::GameRng::new(1);
        let center = config.screen_center();

        ball.reset(center, &mut rng);
        let mut previous = ball.base_speed.unwrap();
        for n in 1..=40 {
            ball.reset(center, &mut rng);
            let speed = ball.base_speed.unwrap();
            let expected = config.ball_speed_initial * config.ball_speed_growth.powi(n);
            assert!(speed > previous, "Speed must keep growing");
            assert!(
                (speed - expected).abs() < 1e-3,
                "After {n} growth steps expected {expected}, got {speed}"
            );
            assert_eq!(ball.vel.x.abs(), speed);
            assert_eq!(ball.vel.y.abs(), speed);
            previous = speed;
        }
    }

    #[test]
    fn test_ball_reset_covers_all_directions() {
        let config = Config::new();
        let mut ball = Ball::from_config(&config);
        let mut rng = crate::GameRng::new(3);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            ball.reset(config.screen_center(), &mut rng);
            assert_eq!(ball.pos, config.screen_center());
            seen.insert((ball.vel.x > 0.0, ball.vel.y > 0.0));
        }
        assert_eq!(seen.len(), 4, "All four sign combinations should occur");
    }

    #[test]
    fn test_ball_bounces_off_top_edge() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::new(Vec2::new(400.0, 10.0), Vec2::new(5.0, -5.0), 7.0);

        let contact = ball.update(&left, &right, config.screen_height);

        assert!(contact.wall);
        assert_eq!(ball.pos, Vec2::new(405.0, 5.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0), "Only the vertical sign flips");
    }

    #[test]
    fn test_ball_bounces_off_bottom_edge() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::new(Vec2::new(400.0, 590.0), Vec2::new(-5.0, 5.0), 7.0);

        let contact = ball.update(&left, &right, config.screen_height);

        assert!(contact.wall);
        assert_eq!(ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_ball_moves_freely_mid_court() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0), 7.0);

        let contact = ball.update(&left, &right, config.screen_height);

        assert_eq!(contact, BallContact::default());
        assert_eq!(ball.pos, Vec2::new(405.0, 305.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_ball_snaps_out_of_left_paddle() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        // Already overlapping the paddle face and moving into it
        let mut ball = Ball::new(Vec2::new(45.0, 300.0), Vec2::new(-5.0, 5.0), 7.0);
        assert!(ball.bounds().overlaps(&left.bounds()));

        let contact = ball.update(&left, &right, config.screen_height);

        assert_eq!(contact.paddle, Some(Side::Left));
        assert_eq!(ball.vel.x, 5.0, "Horizontal direction reversed");
        assert_eq!(ball.vel.y, 5.0, "No vertical deflection");
        assert_eq!(ball.pos.x, 30.0 + 10.0 + 7.0 + 1.0);
        assert!(!ball.bounds().overlaps(&left.bounds()));
    }

    #[test]
    fn test_ball_snaps_out_of_right_paddle() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::new(Vec2::new(752.0, 300.0), Vec2::new(5.0, -5.0), 7.0);

        let contact = ball.update(&left, &right, config.screen_height);

        assert_eq!(contact.paddle, Some(Side::Right));
        assert_eq!(ball.vel.x, -5.0);
        assert_eq!(ball.pos.x, 760.0 - 7.0 - 1.0);
        assert!(!ball.bounds().overlaps(&right.bounds()));
    }

    #[test]
    fn test_bounces_invert_the_incoming_velocity() {
        let config = Config::new();
        let (left, right) = paddles(&config);

        let incoming = Vec2::new(-6.5, 3.0);
        let mut ball = Ball::new(Vec2::new(47.0, 300.0), incoming, 7.0);
        ball.update(&left, &right, config.screen_height);
        assert_eq!(ball.vel, Vec2::new(-incoming.x, incoming.y), "Left paddle");

        let incoming = Vec2::new(6.5, -3.0);
        let mut ball = Ball::new(Vec2::new(752.0, 300.0), incoming, 7.0);
        ball.update(&left, &right, config.screen_height);
        assert_eq!(ball.vel, Vec2::new(-incoming.x, incoming.y), "Right paddle");

        let incoming = Vec2::new(2.5, -4.0);
        let mut ball = Ball::new(Vec2::new(400.0, 9.0), incoming, 7.0);
        ball.update(&left, &right, config.screen_height);
        assert_eq!(ball.vel, Vec2::new(incoming.x, -incoming.y), "Top wall");
    }

    #[test]
    fn test_snap_margin_comes_from_config() {
        let mut config = Config::new();
        config.ball_snap_margin = 3.0;
        let (left, right) = paddles(&config);
        let mut ball = Ball::from_config(&config);
        ball.pos = Vec2::new(45.0, 300.0);
        ball.vel = Vec2::new(-5.0, 5.0);

        ball.update(&left, &right, config.screen_height);

        assert_eq!(ball.pos.x, 30.0 + 10.0 + 7.0 + 3.0);
    }

    #[test]
    fn test_ball_does_not_rebounce_after_snap() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::new(Vec2::new(45.0, 300.0), Vec2::new(-5.0, 5.0), 7.0);

        ball.update(&left, &right, config.screen_height);
        let contact = ball.update(&left, &right, config.screen_height);

        assert_eq!(contact.paddle, None, "One hit, one bounce");
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_ball_misses_paddle_above_it() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        // Level with the left paddle's x range, but well above its top edge
        let mut ball = Ball::new(Vec2::new(40.0, 100.0), Vec2::new(-5.0, 5.0), 7.0);

        let contact = ball.update(&left, &right, config.screen_height);

        assert_eq!(contact.paddle, None);
        assert_eq!(ball.vel.x, -5.0);
    }

    #[test]
    fn test_ball_speed_magnitude_constant_between_resets() {
        let config = Config::new();
        let (left, right) = paddles(&config);
        let mut ball = Ball::from_config(&config);
        let mut rng = crate::GameRng::new(11);
        ball.reset(config.screen_center(), &mut rng);
        let base = ball.base_speed.unwrap();

        for _ in 0..1_000 {
            ball.update(&left, &right, config.screen_height);
            assert_eq!(ball.vel.x.abs(), base);
            assert_eq!(ball.vel.y.abs(), base);
        }
    }
}
