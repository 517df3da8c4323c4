use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::GameVm;

#[component]
pub fn SummaryView(vm: Signal<GameVm>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut restart_failed = use_signal(|| false);

    let state = vm.read();
    let score = state.score;
    let best = state.best;
    let is_new_best = score > 0 && score == best;

    let on_play_again = {
        let game = ctx.game_loop();
        use_callback(move |()| {
            let result = game.play_again();
            restart_failed.set(result.is_err());
        })
    };
    let on_menu = {
        let game = ctx.game_loop();
        use_callback(move |()| game.show_menu())
    };

    rsx! {
        div { class: "page summary",
            h2 { "Run over" }

            dl { class: "summary-stats",
                dt { "Score" }
                dd { "{score}" }

                dt { "Best" }
                dd { "{best}" }
            }

            if is_new_best {
                p { class: "new-best", "New best score!" }
            }

            div { class: "summary-actions",
                button {
                    id: "summary-play-again",
                    class: "primary",
                    autofocus: true,
                    onclick: move |_| on_play_again.call(()),
                    "Play again"
                }
                button {
                    id: "summary-menu",
                    onclick: move |_| on_menu.call(()),
                    "Menu"
                }
            }

            if restart_failed() {
                p { class: "error", "Could not start a new run. Please try again." }
            }
        }
    }
}
