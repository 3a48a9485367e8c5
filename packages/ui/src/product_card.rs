use catalog::Product;
use dioxus::prelude::*;

use crate::format::{format_usd, truncate_name};
use crate::icons::{FaPen, FaTrash};
use crate::Icon;

/// Grid card for one product with edit and delete actions.
#[component]
pub fn ProductCard(
    product: Product,
    on_request_delete: EventHandler<Product>,
    /// Called with the category id when the category chip is clicked.
    on_select_category: EventHandler<String>,
) -> Element {
    let detail = product.detail_path();
    let edit = format!("{detail}/edit");
    let category_name = product.category.name.clone();
    let category_id = product.category.id.clone();
    let for_delete = product.clone();

    rsx! {
        div {
            class: "card product-card",
            Link {
                to: detail.clone(),
                class: "card-image",
                img {
                    src: "{product.cover_image()}",
                    alt: "{product.name}",
                    loading: "lazy",
                }
            }

            div {
                class: "card-body",
                div {
                    class: "card-heading",
                    Link {
                        to: detail,
                        class: "card-title",
                        "{truncate_name(&product.name, 20)}"
                    }
                    div {
                        class: "card-actions",
                        Link {
                            to: edit,
                            class: "btn btn-ghost",
                            aria_label: "Edit",
                            Icon { icon: FaPen, width: 14, height: 14 }
                        }
                        button {
                            class: "btn btn-danger",
                            aria_label: "Delete",
                            onclick: move |_| on_request_delete.call(for_delete.clone()),
                            Icon { icon: FaTrash, width: 14, height: 14 }
                        }
                    }
                }
                p { class: "card-description", "{product.description}" }
                div {
                    class: "card-footer",
                    span { class: "price", "{format_usd(product.price)}" }
                    if !category_id.is_empty() {
                        button {
                            class: "chip",
                            title: "Filter by {category_name}",
                            onclick: move |_| on_select_category.call(category_id.clone()),
                            "{category_name}"
                        }
                    }
                }
            }
        }
    }
}
