use dioxus::prelude::*;
use keyboard_types::Key;

use quiz_core::model::TopicSet;

use crate::context::AppContext;
use crate::vm::GameVm;

#[component]
pub fn MenuView(vm: Signal<GameVm>, topics: Signal<TopicSet>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut start_failed = use_signal(|| false);

    let best = vm.read().best;
    let selected = topics.read().len();
    let selection_line = if selected == 0 {
        "All topics enabled".to_string()
    } else {
        format!("{selected} topics enabled")
    };

    let on_start = {
        let game = ctx.game_loop();
        use_callback(move |()| {
            let result = game.start_game(topics.read().clone());
            start_failed.set(result.is_err());
        })
    };
    let on_topics = {
        let game = ctx.game_loop();
        use_callback(move |()| game.open_topics())
    };

    rsx! {
        div {
            class: "page menu",
            tabindex: "0",
            // "s" as a start shortcut alongside the focused button.
            onkeydown: move |evt| {
                if evt.data.key() == Key::Character("s".to_string()) {
                    evt.prevent_default();
                    on_start.call(());
                }
            },
            h1 { "QuickMath" }
            p { class: "best", "Best score: {best}" }
            p { class: "topic-count", "{selection_line}" }

            div { class: "menu-actions",
                button {
                    id: "menu-start",
                    class: "primary",
                    autofocus: true,
                    onclick: move |_| on_start.call(()),
                    "Start"
                }
                button {
                    id: "menu-topics",
                    onclick: move |_| on_topics.call(()),
                    "Topics"
                }
            }

            if start_failed() {
                p { class: "error", "Could not start the game. Please try again." }
            }
        }
    }
}
