mod grid;
mod question;
mod topic;

pub use grid::{Cell, Grid};
pub use question::{
    MEMORY_SEQ_MAX_LEN, MEMORY_SEQ_MIN_LEN, MEMORY_VALUE_MAX, MEMORY_VALUE_MIN,
    PUZZLE_OPTION_COUNT, Question, QuestionError, Variant,
};
pub use topic::{Topic, TopicSet};
