#![forbid(unsafe_code)]

pub mod error;
pub mod game;

pub use quiz_core::Clock;

pub use error::GameError;
pub use game::{
    CountdownTimer, GameEngine, GameEvent, GameLoopService, Judgement, RoundSetup, Screen,
    reveal_sequence,
};
