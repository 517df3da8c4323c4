use dioxus::prelude::*;
use keyboard_types::Key;

use quiz_core::model::{Grid, Question};
use quiz_core::scoring::QUESTION_TIME_MS;

use crate::context::AppContext;
use crate::vm::{FeedbackVm, GameVm, format_remaining};

#[component]
pub fn GameView(vm: Signal<GameVm>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut input = use_signal(String::new);
    let mut input_round = use_signal(|| 0u64);
    let mut save_failed = use_signal(|| false);

    let state = vm.read().clone();
    let round = state.round;

    // A fresh round gets a fresh input box.
    use_effect(move || {
        if input_round() != round {
            input_round.set(round);
            input.set(String::new());
        }
    });

    let submit = {
        let game = ctx.game_loop();
        use_callback(move |()| {
            game.submit_numeric(&input());
        })
    };
    let choose = {
        let game = ctx.game_loop();
        use_callback(move |option: i64| game.choose_option(option))
    };
    let end_run = {
        let game = ctx.game_loop();
        use_callback(move |()| {
            let game = game.clone();
            spawn(async move {
                if game.show_summary().await.is_err() {
                    save_failed.set(true);
                }
            });
        })
    };

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.data.key() == Key::Enter {
            evt.prevent_default();
            submit.call(());
        } else if evt.data.key() == Key::Escape {
            evt.prevent_default();
            end_run.call(());
        }
    });

    let accepts_input = state.accepts_input();
    #[allow(clippy::cast_precision_loss)]
    let timer_fraction =
        (state.remaining_ms as f64 / QUESTION_TIME_MS.unsigned_abs() as f64).clamp(0.0, 1.0);

    rsx! {
        div { class: "page game",
            header { class: "scoreboard",
                span { class: "score", "Score: {state.score}" }
                span { class: "streak", "Streak: {state.streak}" }
                span { class: "best", "Best: {state.best}" }
                button {
                    id: "game-end",
                    class: "quit",
                    onclick: move |_| end_run.call(()),
                    "End run"
                }
            }

            div { class: "timer",
                div {
                    class: "timer-bar",
                    style: "width: {timer_fraction * 100.0}%;",
                }
                span { class: "timer-text", "{format_remaining(state.remaining_ms)}" }
            }

            if let Some(question) = state.question.as_ref() {
                if state.revealing {
                    RevealCard { value: state.reveal_value }
                } else {
                    QuestionCard {
                        question: question.clone(),
                        accepts_input,
                        input,
                        on_key,
                        on_submit: submit,
                        on_choose: choose,
                    }
                }
            }

            if let Some(feedback) = state.feedback {
                FeedbackLine { feedback }
            }
            if save_failed() {
                p { class: "error", "Your best score could not be saved." }
            }
        }
    }
}

/// One value of a memory sequence, full-screen sized.
#[component]
fn RevealCard(value: Option<i64>) -> Element {
    rsx! {
        div { class: "reveal",
            p { class: "hint", "Remember the numbers..." }
            if let Some(value) = value {
                span { class: "reveal-value", "{value}" }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: Question,
    accepts_input: bool,
    input: Signal<String>,
    on_key: Callback<KeyboardEvent>,
    on_submit: Callback<()>,
    on_choose: Callback<i64>,
) -> Element {
    let mut input = input;

    rsx! {
        div { class: "question",
            p { class: "topic", "{question.topic().label()}" }

            if question.is_memory() {
                p { class: "prompt", "What was the sum?" }
            } else {
                p { class: "prompt", "{question.prompt()}" }
            }

            if let Some(grid) = question.grid() {
                PuzzleGrid { grid: *grid }
            }

            if let Some(options) = question.options() {
                div { class: "options",
                    for option in options.iter().copied() {
                        button {
                            key: "{option}",
                            class: "option",
                            disabled: !accepts_input,
                            onclick: move |_| on_choose.call(option),
                            "{option}"
                        }
                    }
                }
            } else {
                div { class: "answer-row",
                    input {
                        id: "game-answer",
                        r#type: "text",
                        inputmode: "numeric",
                        autofocus: true,
                        disabled: !accepts_input,
                        value: "{input}",
                        oninput: move |evt| input.set(evt.value()),
                        onkeydown: move |evt| on_key.call(evt),
                    }
                    button {
                        id: "game-submit",
                        class: "primary",
                        disabled: !accepts_input,
                        onclick: move |_| on_submit.call(()),
                        "Answer"
                    }
                }
            }

            p { class: "tip", "{question.tip()}" }
        }
    }
}

#[component]
fn PuzzleGrid(grid: Grid) -> Element {
    rsx! {
        table { class: "puzzle-grid",
            for (row_idx, row) in grid.rows().iter().enumerate() {
                tr { key: "{row_idx}",
                    for (col_idx, cell) in row.iter().enumerate() {
                        td {
                            key: "{col_idx}",
                            class: if cell.is_blank() { "cell blank" } else { "cell" },
                            "{cell}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FeedbackLine(feedback: FeedbackVm) -> Element {
    rsx! {
        if feedback.correct {
            p { class: "feedback good", "Correct! +{feedback.awarded}" }
        } else {
            p { class: "feedback bad", "The answer was {feedback.expected}" }
        }
    }
}
