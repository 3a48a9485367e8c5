use dioxus::prelude::*;
use ui::views::{EditProductView, NewProductView, ProductDetailView, ProductListView};

#[component]
pub fn Products(query: String) -> Element {
    rsx! {
        ProductListView { initial_query: query }
    }
}

#[component]
pub fn ProductDetail(slug: String) -> Element {
    rsx! {
        ProductDetailView { slug }
    }
}

#[component]
pub fn NewProduct() -> Element {
    let nav = use_navigator();

    rsx! {
        NewProductView {
            on_saved: move |route: String| {
                nav.push(route);
            },
        }
    }
}

#[component]
pub fn EditProduct(slug: String) -> Element {
    let nav = use_navigator();

    rsx! {
        EditProductView {
            slug,
            on_saved: move |route: String| {
                nav.push(route);
            },
        }
    }
}
