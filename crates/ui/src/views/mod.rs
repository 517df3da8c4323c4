mod game;
mod intro;
mod menu;
mod summary;
mod topics;

pub use game::GameView;
pub use intro::IntroView;
pub use menu::MenuView;
pub use summary::SummaryView;
pub use topics::TopicsView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
