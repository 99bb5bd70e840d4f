pub mod components;
pub mod config;
pub mod fsm;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod map;
pub mod params;
pub mod render;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use fsm::*;
pub use game::*;
pub use game_loop::*;
pub use input::*;
pub use map::*;
pub use params::*;
pub use render::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one tick of live play.
///
/// Returns the side that scored, if the ball left the court this tick.
pub fn step<R: Randomness + ?Sized>(
    world: &mut World,
    map: &GameMap,
    score: &mut Score,
    countdown: &mut Countdown,
    events: &mut Events,
    held: HeldKeys,
    rng: &mut R,
) -> Option<Side> {
    // Clear events at start of tick
    events.clear();

    // 1. Autopilot paddles react to the ball
    drive_autopilots(world, map, rng);

    // 2. Held keys become intents, intents become movement
    apply_human_input(world, held);
    move_paddles(world, map);

    // 3. Move ball, bounce off walls and paddles
    update_ball(world, map, events);

    // 4. Check scoring (ball exited the court)
    check_scoring(world, map, score, countdown, events, rng)
}

/// Who moves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Autopilot,
    Human,
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, paddle: Paddle, control: Control) -> hecs::Entity {
    match control {
        Control::Autopilot => world.spawn((paddle, Autopilot)),
        Control::Human => world.spawn((paddle, PaddleIntent::new(), HumanControlled)),
    }
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
