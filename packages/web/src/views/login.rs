//! Login page view.

use dioxus::prelude::*;
use ui::views::LoginView;

use crate::Route;

/// Login page component. Signed-in users go straight to the product list.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Products { query: String::new() });
            },
        }
    }
}
