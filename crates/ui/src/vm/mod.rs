mod game_vm;
mod time_fmt;

pub use game_vm::{FeedbackVm, GameVm};
pub use time_fmt::format_remaining;
