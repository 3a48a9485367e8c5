use dioxus::prelude::*;

/// A full-screen backdrop that centers its children in a dialog card.
/// Clicking the backdrop triggers `on_close`.
#[component]
pub fn ModalOverlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div { class: "modal-header", h2 { "{title}" } }
                {children}
            }
        }
    }
}
