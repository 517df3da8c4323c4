mod engine;
mod event;
mod reveal;
mod timer;
mod workflow;

// Public API of the game subsystem.
pub use crate::error::GameError;
pub use engine::{GameEngine, Judgement, RoundSetup, Screen};
pub use event::GameEvent;
pub use reveal::reveal_sequence;
pub use timer::CountdownTimer;
pub use workflow::GameLoopService;
