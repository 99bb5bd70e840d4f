//! Fixed-cadence game loop
//!
//! One iteration: wait for the frame boundary, poll input, advance the
//! game by the measured elapsed time, render. Quit takes effect after the
//! tick's frame has been presented.

use crate::{render, Canvas, Flow, Game, InputSource, Randomness, Score};
use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, trace};

/// Blocks until the next tick boundary
pub trait FramePacer {
    /// Wait for the next tick; returns milliseconds since the previous one
    fn wait_for_tick(&mut self) -> u32;
}

/// Sleeps so ticks land at most `fps` times per second
#[derive(Debug)]
pub struct FixedRatePacer {
    frame: Duration,
    last: Instant,
}

impl FixedRatePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }
}

impl FramePacer for FixedRatePacer {
    fn wait_for_tick(&mut self) -> u32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        u32::try_from(dt.as_millis()).unwrap_or(u32::MAX)
    }
}

/// A collaborator failed; the loop stops at the first failure
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("input polling failed")]
    Input(#[source] Box<dyn Error + Send + Sync>),
    #[error("render pass failed")]
    Render(#[source] Box<dyn Error + Send + Sync>),
}

/// How a finished run went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: Score,
}

/// Drive `game` until the input source asks to quit
pub fn run<R, I, C, P>(
    game: &mut Game<R>,
    input: &mut I,
    canvas: &mut C,
    pacer: &mut P,
) -> Result<RunSummary, LoopError>
where
    R: Randomness,
    I: InputSource + ?Sized,
    C: Canvas + ?Sized,
    P: FramePacer + ?Sized,
{
    let mut ticks = 0u64;
    loop {
        let dt_ms = pacer.wait_for_tick();
        let tick_input = input.poll().map_err(|e| LoopError::Input(Box::new(e)))?;

        let flow = game.tick(&tick_input, dt_ms);
        render(game, canvas).map_err(|e| LoopError::Render(Box::new(e)))?;
        ticks += 1;
        trace!(ticks, dt_ms, phase = ?game.phase(), "tick");

        if flow == Flow::Quit {
            info!(ticks, left = game.score.left, right = game.score.right, "game loop finished");
            return Ok(RunSummary {
                ticks,
                score: game.score,
            });
        }
    }
}
