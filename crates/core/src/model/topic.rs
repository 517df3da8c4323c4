use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag used to filter which generation rules are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topic {
    Add,
    Sub,
    Mul,
    Div,
    Square,
    Cube,
    Sqrt,
    Memory,
    Puzzle,
}

impl Topic {
    /// All topics, in menu order.
    pub const ALL: [Topic; 9] = [
        Topic::Add,
        Topic::Sub,
        Topic::Mul,
        Topic::Div,
        Topic::Square,
        Topic::Cube,
        Topic::Sqrt,
        Topic::Memory,
        Topic::Puzzle,
    ];

    /// Human-readable label for menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Topic::Add => "Addition",
            Topic::Sub => "Subtraction",
            Topic::Mul => "Multiplication",
            Topic::Div => "Division",
            Topic::Square => "Squares",
            Topic::Cube => "Cubes",
            Topic::Sqrt => "Square roots",
            Topic::Memory => "Memory sums",
            Topic::Puzzle => "Grid puzzles",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selection of enabled topics.
///
/// An empty selection means "everything enabled": with no checkbox
/// ticked the full catalogue is in play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSet {
    selected: BTreeSet<Topic>,
}

impl TopicSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from explicit topics.
    #[must_use]
    pub fn from_topics(topics: impl IntoIterator<Item = Topic>) -> Self {
        Self {
            selected: topics.into_iter().collect(),
        }
    }

    /// Selection containing every topic.
    #[must_use]
    pub fn all() -> Self {
        Self::from_topics(Topic::ALL)
    }

    pub fn insert(&mut self, topic: Topic) {
        self.selected.insert(topic);
    }

    pub fn remove(&mut self, topic: Topic) {
        self.selected.remove(&topic);
    }

    pub fn toggle(&mut self, topic: Topic) {
        if !self.selected.remove(&topic) {
            self.selected.insert(topic);
        }
    }

    /// True when the topic is explicitly selected.
    #[must_use]
    pub fn is_selected(&self, topic: Topic) -> bool {
        self.selected.contains(&topic)
    }

    /// True when no topic is explicitly selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the topic takes part in generation, applying the
    /// empty-means-all fallback.
    #[must_use]
    pub fn is_enabled(&self, topic: Topic) -> bool {
        self.selected.is_empty() || self.selected.contains(&topic)
    }

    /// Number of explicitly selected topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }
}
