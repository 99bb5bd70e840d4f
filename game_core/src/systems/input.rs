use crate::{HeldKeys, HumanControlled, PaddleIntent};
use hecs::World;

/// Turn the held movement keys into intents for human-controlled paddles
pub fn apply_human_input(world: &mut World, held: HeldKeys) {
    let dir = held.direction();
    for (_entity, (intent, _)) in world.query_mut::<(&mut PaddleIntent, &HumanControlled)>() {
        intent.dir = dir;
    }
}
