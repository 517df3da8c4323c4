use dioxus::prelude::*;

use quiz_core::model::{Topic, TopicSet};

use crate::context::AppContext;

#[component]
pub fn TopicsView(topics: Signal<TopicSet>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut start_failed = use_signal(|| false);

    let on_start = {
        let game = ctx.game_loop();
        use_callback(move |()| {
            let result = game.start_game(topics.read().clone());
            start_failed.set(result.is_err());
        })
    };
    let on_done = {
        let game = ctx.game_loop();
        use_callback(move |()| game.back_to_menu())
    };

    rsx! {
        div { class: "page topics",
            h2 { "Topics" }
            p { class: "hint", "Leave everything unticked to practise the full catalogue." }

            ul { class: "topic-list",
                for topic in Topic::ALL {
                    li { key: "{topic.label()}",
                        label {
                            input {
                                r#type: "checkbox",
                                checked: topics.read().is_selected(topic),
                                onchange: move |_| topics.write().toggle(topic),
                            }
                            "{topic.label()}"
                        }
                    }
                }
            }

            div { class: "topics-actions",
                button {
                    id: "topics-start",
                    class: "primary",
                    onclick: move |_| on_start.call(()),
                    "Start"
                }
                button {
                    id: "topics-done",
                    onclick: move |_| on_done.call(()),
                    "Done"
                }
            }

            if start_failed() {
                p { class: "error", "Could not start the game. Please try again." }
            }
        }
    }
}
