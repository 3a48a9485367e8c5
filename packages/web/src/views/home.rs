use dioxus::prelude::*;
use ui::use_app;
use ui::views::ProductListView;

use crate::Route;

/// Landing page: pitch, shortcuts, and the product grid.
#[component]
pub fn Home() -> Element {
    let app = use_app();
    let authed = app.session.read().is_authenticated();
    let initial_query = use_hook(ui::platform::location_query);

    rsx! {
        section {
            class: "container hero",
            h1 { "Build and manage your product catalog beautifully" }
            p { "Search, create, and edit products with a polished, responsive experience." }
            div {
                class: "hero-actions",
                Link {
                    to: Route::Products { query: String::new() },
                    class: "btn btn-primary",
                    "Browse Products"
                }
                if !authed {
                    Link { to: Route::Login {}, class: "btn btn-ghost", "Login" }
                }
            }
        }
        ProductListView { initial_query }
    }
}
