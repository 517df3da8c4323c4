use dioxus::prelude::*;

#[component]
pub fn IntroView() -> Element {
    rsx! {
        div { class: "page intro",
            h1 { "QuickMath" }
            p { class: "tagline", "Fast mental arithmetic, against the clock." }
        }
    }
}
