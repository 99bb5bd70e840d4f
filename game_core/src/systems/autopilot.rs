use crate::{Autopilot, Ball, GameMap, Paddle, Randomness};
use hecs::World;
use tracing::trace;

/// Let every autopilot paddle make its move toward (or away from) the ball
pub fn drive_autopilots<R: Randomness + ?Sized>(world: &mut World, map: &GameMap, rng: &mut R) {
    let ball_y = match world.query::<&Ball>().iter().next().map(|(_e, ball)| ball.pos.y) {
        Some(y) => y,
        None => return, // No ball in world
    };

    for (_entity, (paddle, _)) in world.query_mut::<(&mut Paddle, &Autopilot)>() {
        let dir = paddle.auto_move(ball_y, map.height, rng);
        trace!(side = ?paddle.side, dir, y = paddle.pos.y, "autopilot move");
    }
}
