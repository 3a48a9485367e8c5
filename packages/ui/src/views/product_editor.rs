use dioxus::prelude::*;

use crate::{platform, use_app, ProductFormView, CATALOG_CSS};

/// "Create product" page.
#[component]
pub fn NewProductView(on_saved: EventHandler<String>) -> Element {
    rsx! {
        EditorCard {
            title: "Create product",
            ProductFormView { on_saved }
        }
    }
}

/// "Edit product" page; loads the product by slug first.
#[component]
pub fn EditProductView(slug: String, on_saved: EventHandler<String>) -> Element {
    let app = use_app();
    let mut slug_signal = use_signal(|| slug.clone());
    if *slug_signal.peek() != slug {
        slug_signal.set(slug.clone());
    }

    let product = use_resource(move || {
        let slug = slug_signal();
        let client = app.client();
        async move {
            client.get_product_by_slug(&slug).await.map_err(|e| {
                platform::warn(&format!("Failed to load product {slug}: {e}"));
                e.to_string()
            })
        }
    });

    rsx! {
        EditorCard {
            title: "Edit product",
            match product.read().clone() {
                None => rsx! { p { "Loading..." } },
                Some(Err(_)) => rsx! { p { class: "error", "Failed to load product." } },
                Some(Ok(product)) => rsx! {
                    ProductFormView {
                        key: "{product.id}",
                        product,
                        on_saved,
                    }
                },
            }
        }
    }
}

#[component]
fn EditorCard(title: String, children: Element) -> Element {
    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        main {
            class: "container",
            div {
                class: "card editor",
                div {
                    class: "card-body",
                    h1 { class: "card-title", "{title}" }
                    {children}
                }
            }
        }
    }
}
