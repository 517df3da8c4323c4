use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedReceiver;

use services::{GameEvent, GameLoopService};

pub trait UiApp: Send + Sync {
    fn game_loop(&self) -> GameLoopService;

    /// Hand over the event stream produced by the game loop. The stream
    /// exists exactly once; subsequent calls return `None`.
    fn take_events(&self) -> Option<UnboundedReceiver<GameEvent>>;
}

#[derive(Clone)]
pub struct AppContext {
    game_loop: GameLoopService,
    events: Arc<Mutex<Option<UnboundedReceiver<GameEvent>>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            game_loop: app.game_loop(),
            events: Arc::new(Mutex::new(app.take_events())),
        }
    }

    #[must_use]
    pub fn game_loop(&self) -> GameLoopService {
        self.game_loop.clone()
    }

    /// One-shot: the first caller (the root component's event pump)
    /// gets the receiver, everyone after gets `None`.
    #[must_use]
    pub fn take_events(&self) -> Option<UnboundedReceiver<GameEvent>> {
        self.events.lock().ok()?.take()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
