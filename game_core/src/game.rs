use crate::{
    create_ball, create_paddle, step, Ball, Config, Control, Countdown, Events, GameMap, GameRng,
    InputEvent, Paddle, Phase, Randomness, RoundAction, RoundFsm, Score, Side, TickInput, Time,
};
use hecs::{Entity, World};
use tracing::{debug, info};

/// Whether the loop should keep going after this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A full game: the world, its resources and the round state machine.
///
/// The left paddle is driven by the autopilot, the right one by held keys.
pub struct Game<R: Randomness = GameRng> {
    pub world: World,
    pub time: Time,
    pub map: GameMap,
    pub config: Config,
    pub score: Score,
    pub countdown: Countdown,
    pub events: Events,
    pub rng: R,
    fsm: RoundFsm,
    left_paddle: Entity,
    right_paddle: Entity,
    ball: Entity,
}

impl Game<GameRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Config::new(), GameRng::new(seed))
    }
}

impl<R: Randomness> Game<R> {
    pub fn with_rng(config: Config, mut rng: R) -> Self {
        let map = GameMap::new(&config);
        let mut world = World::new();

        let left_paddle = create_paddle(
            &mut world,
            Paddle::new(Side::Left, &config),
            Control::Autopilot,
        );
        let right_paddle = create_paddle(
            &mut world,
            Paddle::new(Side::Right, &config),
            Control::Human,
        );

        let mut ball = Ball::from_config(&config);
        ball.reset(map.ball_spawn(), &mut rng);
        let ball = create_ball(&mut world, ball);

        Self {
            world,
            time: Time::default(),
            map,
            countdown: Countdown::new(config.countdown_ms),
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            fsm: RoundFsm::new(),
            left_paddle,
            right_paddle,
            ball,
        }
    }

    pub fn phase(&self) -> Phase {
        self.fsm.state()
    }

    pub fn game_active(&self) -> bool {
        self.fsm.game_active()
    }

    pub fn countdown_active(&self) -> bool {
        self.fsm.countdown_active()
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        let entity = match side {
            Side::Left => self.left_paddle,
            Side::Right => self.right_paddle,
        };
        self.world.get::<&Paddle>(entity).ok().map(|paddle| *paddle)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| *ball)
    }

    /// Run one tick: apply this tick's events, then advance whichever
    /// phase the game is in by `dt_ms` of measured time. A phase entered
    /// through an event this tick starts advancing on the next one.
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) -> Flow {
        self.time.advance(dt_ms);
        self.events.clear();

        let phase_before = self.fsm.state();
        let mut flow = Flow::Continue;
        for event in &input.events {
            if self.handle_event(*event) == Flow::Quit {
                flow = Flow::Quit;
            }
        }
        if self.fsm.state() != phase_before {
            return flow;
        }

        match self.fsm.state() {
            Phase::Playing => {
                let scored = step(
                    &mut self.world,
                    &self.map,
                    &mut self.score,
                    &mut self.countdown,
                    &mut self.events,
                    input.held,
                    &mut self.rng,
                );
                if scored.is_some() {
                    self.apply(RoundAction::PointScored);
                }
            }
            Phase::Countdown => {
                if self.countdown.advance(dt_ms) {
                    self.apply(RoundAction::CountdownDone);
                }
            }
            Phase::Idle => {}
        }

        flow
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => {
                info!("quit requested");
                return Flow::Quit;
            }
            InputEvent::Start => {
                self.start();
            }
            InputEvent::Reset => self.full_reset(),
        }
        Flow::Continue
    }

    /// Leave the intro screen and arm the pre-serve countdown.
    /// Returns false (and changes nothing) unless the game is idle.
    pub fn start(&mut self) -> bool {
        if !self.apply(RoundAction::Start) {
            return false;
        }
        self.countdown.arm();
        true
    }

    /// Back to the intro screen with a fresh score. The ball is served
    /// again like after a point, so its speed keeps compounding; paddles
    /// stay where they are.
    pub fn full_reset(&mut self) {
        self.apply(RoundAction::Reset);
        self.score.reset();
        self.countdown.cancel();

        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.reset(self.map.ball_spawn(), &mut self.rng);
        }
    }

    fn apply(&mut self, action: RoundAction) -> bool {
        let result = self.fsm.transition(action);
        if result.success {
            info!(
                from = ?result.from_state,
                to = ?result.to_state,
                ?action,
                "round transition"
            );
        } else {
            debug!(state = ?result.from_state, ?action, "ignored round action");
        }
        result.success
    }
}
