use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;

use quiz_core::time::fixed_clock;
use services::{GameEngine, GameEvent, GameLoopService};
use storage::repository::InMemoryRepository;

use crate::app::App;
use crate::context::{UiApp, build_app_context};

struct TestApp {
    game_loop: GameLoopService,
    events: Mutex<Option<UnboundedReceiver<GameEvent>>>,
}

impl UiApp for TestApp {
    fn game_loop(&self) -> GameLoopService {
        self.game_loop.clone()
    }

    fn take_events(&self) -> Option<UnboundedReceiver<GameEvent>> {
        self.events.lock().ok()?.take()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn Harness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { App {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub game: GameLoopService,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Full UI wired to an in-memory repository and a deterministic engine.
pub fn setup_view_harness(seed: u64, best: u32) -> ViewHarness {
    let repo = Arc::new(InMemoryRepository::new());
    let engine = GameEngine::new(best)
        .with_clock(fixed_clock())
        .with_rng_seed(seed);
    let (game, events) = GameLoopService::new(engine, repo);

    let app = Arc::new(TestApp {
        game_loop: game.clone(),
        events: Mutex::new(Some(events)),
    });
    let dom = VirtualDom::new_with_props(Harness, HarnessProps { app });

    ViewHarness { dom, game }
}
