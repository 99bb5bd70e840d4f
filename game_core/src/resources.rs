use crate::Side;
use rand::Rng;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub dt_ms: u32,  // Measured wall-clock time since the previous tick
    pub now_ms: u64, // Total elapsed time
}

impl Time {
    pub fn advance(&mut self, dt_ms: u32) {
        self.dt_ms = dt_ms;
        self.now_ms += u64::from(dt_ms);
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_left(&mut self) {
        self.left += 1;
    }

    pub fn increment_right(&mut self) {
        self.right += 1;
    }

    /// Credit one point to `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.increment_left(),
            Side::Right => self.increment_right(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Source of every random decision the simulation makes.
///
/// `GameRng` is the production implementation; tests plug in scripted
/// sequences to pin down exact trajectories.
pub trait Randomness {
    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool;
    /// Uniform pick from {-1 (up), 0 (stay), 1 (down)}
    fn pick_move(&mut self) -> i8;
    /// Fair coin
    fn coin_flip(&mut self) -> bool;
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl Randomness for GameRng {
    fn chance(&mut self, p: f32) -> bool {
        self.0.gen::<f32>() < p
    }

    fn pick_move(&mut self) -> i8 {
        self.0.gen_range(-1..=1)
    }

    fn coin_flip(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.left_scored = false;
        self.right_scored = false;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
    }

    pub fn scored(&self) -> Option<Side> {
        if self.left_scored {
            Some(Side::Left)
        } else if self.right_scored {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Pre-round countdown that gates play
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    active: bool,
    remaining_ms: i32, // only meaningful while active
    duration_ms: i32,
}

impl Countdown {
    pub fn new(duration_ms: i32) -> Self {
        Self {
            active: false,
            remaining_ms: duration_ms,
            duration_ms,
        }
    }

    /// Start (or restart) the countdown at full duration
    pub fn arm(&mut self) {
        self.active = true;
        self.remaining_ms = self.duration_ms;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.remaining_ms = self.duration_ms;
    }

    /// Subtract `dt_ms`; returns true on the call that runs it out
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if !self.active {
            return false;
        }
        let dt = i32::try_from(dt_ms).unwrap_or(i32::MAX);
        self.remaining_ms = self.remaining_ms.saturating_sub(dt);
        if self.remaining_ms <= 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_ms(&self) -> i32 {
        self.remaining_ms
    }

    /// Digit shown while counting: floor(remaining / 1000) + 1, kept within
    /// 1..=ceil(duration / 1000). `None` when the countdown is not running.
    pub fn display_number(&self) -> Option<u32> {
        if !self.active {
            return None;
        }
        let max = (self.duration_ms.max(0) as u32).div_ceil(1000).max(1);
        let shown = self.remaining_ms.max(0) as u32 / 1000 + 1;
        Some(shown.clamp(1, max))
    }
}
