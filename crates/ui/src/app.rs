use dioxus::prelude::*;

use quiz_core::model::TopicSet;
use services::Screen;

use crate::context::AppContext;
use crate::views::{GameView, IntroView, MenuView, SummaryView, TopicsView};
use crate::vm::GameVm;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(GameVm::new);
    let topics = use_signal(TopicSet::new);

    // Pump the game-loop event stream into the view model. The stream
    // exists once; a remounted root simply finds it already taken.
    use_hook(move || {
        let mut vm = vm;
        if let Some(mut events) = ctx.take_events() {
            spawn(async move {
                while let Some(event) = events.recv().await {
                    vm.write().apply(&event);
                }
            });
        }
        ctx.game_loop().start();
    });

    let screen = vm.read().screen;

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "QuickMath" }

        // A single root container for global layout CSS hooks.
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                match screen {
                    Screen::Intro => rsx! { IntroView {} },
                    Screen::Menu => rsx! { MenuView { vm, topics } },
                    Screen::Topics => rsx! { TopicsView { topics } },
                    Screen::Game => rsx! { GameView { vm } },
                    Screen::Summary => rsx! { SummaryView { vm } },
                }
            }
        }
    }
}
