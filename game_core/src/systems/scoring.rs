use crate::{Ball, Countdown, Events, GameMap, Randomness, Score, Side};
use hecs::World;
use tracing::info;

/// Check if ball left the arena (scoring).
///
/// A ball past the left edge is a point for the right player and vice
/// versa. Scoring resets the ball and re-arms the countdown.
pub fn check_scoring<R: Randomness + ?Sized>(
    world: &mut World,
    map: &GameMap,
    score: &mut Score,
    countdown: &mut Countdown,
    events: &mut Events,
    rng: &mut R,
) -> Option<Side> {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if map.exited_left(ball.pos.x, ball.radius) {
            Side::Right
        } else if map.exited_right(ball.pos.x, ball.radius) {
            Side::Left
        } else {
            continue;
        };

        score.award(scorer);
        match scorer {
            Side::Left => events.left_scored = true,
            Side::Right => events.right_scored = true,
        }
        info!(?scorer, left = score.left, right = score.right, "point scored");

        ball.reset(map.ball_spawn(), rng);
        countdown.arm();
        return Some(scorer);
    }
    None
}
