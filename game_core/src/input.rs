//! Input model consumed by the simulation each tick

/// Discrete key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / quit key
    Quit,
    /// Space on the intro screen
    Start,
    /// Full game reset
    Reset,
}

/// Continuous pressed-state of the movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// -1 = up, 1 = down, 0 when neither or both are held
    pub fn direction(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Everything polled from the input collaborator for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(event: InputEvent) -> Self {
        Self {
            events: vec![event],
            held: HeldKeys::default(),
        }
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self {
            events: Vec::new(),
            held,
        }
    }
}

/// Abstract input device, polled once per tick
pub trait InputSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn poll(&mut self) -> Result<TickInput, Self::Error>;
}
