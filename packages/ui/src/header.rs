use dioxus::prelude::*;

use crate::icons::{FaBagShopping, FaPlus, FaRightFromBracket};
use crate::{use_app, Icon, CATALOG_CSS};

/// Top bar: brand, navigation, and the signed-in badge.
#[component]
pub fn Header() -> Element {
    let app = use_app();
    let nav = use_navigator();
    let session = app.session.read().clone();

    let handle_logout = move |_| async move {
        app.sign_out().await;
        nav.push("/login");
    };

    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        header {
            class: "header",
            div {
                class: "container header-inner",
                Link {
                    to: "/",
                    class: "brand",
                    Icon { icon: FaBagShopping, width: 20, height: 20 }
                    "BiteX Products"
                }

                nav {
                    class: "header-nav",
                    if session.is_authenticated() {
                        Link { to: "/products", class: "btn btn-ghost", "Browse" }
                        Link {
                            to: "/products/new",
                            class: "btn btn-primary",
                            Icon { icon: FaPlus, width: 14, height: 14 }
                            "New"
                        }
                        button {
                            class: "btn btn-ghost",
                            onclick: handle_logout,
                            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                            "Logout"
                        }
                        span {
                            class: "badge",
                            title: session.email().unwrap_or_default(),
                            "{session.initials()}"
                        }
                    } else {
                        Link { to: "/login", class: "btn btn-primary", "Login" }
                    }
                }
            }
        }
    }
}
