use crate::{Ball, Events, GameMap, Paddle, Side};
use hecs::World;
use tracing::debug;

/// Advance the ball one tick and resolve wall and paddle contacts
pub fn update_ball(world: &mut World, map: &GameMap, events: &mut Events) {
    // Copy the paddles out first so the ball can be borrowed mutably
    let mut left = None;
    let mut right = None;
    for (_entity, paddle) in world.query::<&Paddle>().iter() {
        match paddle.side {
            Side::Left => left = Some(*paddle),
            Side::Right => right = Some(*paddle),
        }
    }

    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        _ => return, // Both paddles are needed to play
    };

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let contact = ball.update(&left, &right, map.height);
        if contact.wall {
            events.ball_hit_wall = true;
            debug!(x = ball.pos.x, y = ball.pos.y, "ball hit wall");
        }
        if let Some(side) = contact.paddle {
            events.ball_hit_paddle = true;
            debug!(?side, x = ball.pos.x, y = ball.pos.y, "ball hit paddle");
        }
    }
}
