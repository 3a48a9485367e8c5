use catalog::ListFilters;
use dioxus::prelude::*;

use crate::format::format_usd;
use crate::icons::FaPen;
use crate::{platform, use_app, Icon, CATALOG_CSS};

const MAX_THUMBNAILS: usize = 5;

/// Index of the image to show large, clamped to the images available.
fn clamp_index(active: usize, len: usize) -> usize {
    active.min(len.saturating_sub(1))
}

/// Product page with gallery, price and description.
#[component]
pub fn ProductDetailView(slug: String) -> Element {
    let app = use_app();
    let mut slug_signal = use_signal(|| slug.clone());
    if *slug_signal.peek() != slug {
        slug_signal.set(slug.clone());
    }
    let mut active_image = use_signal(|| 0usize);

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

    let loaded = product.read().clone();

    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        main {
            class: "container",
            match loaded {
                None => rsx! {
                    div {
                        class: "card detail",
                        div {
                            class: "card-body detail-grid",
                            div { class: "skeleton detail-image" }
                            div {
                                div { class: "skeleton skeleton-title" }
                                div { class: "skeleton skeleton-line" }
                            }
                        }
                    }
                },
                Some(Err(_)) => rsx! {
                    p { class: "error", "Failed to load product." }
                },
                Some(Ok(product)) => {
                    let active = clamp_index(active_image(), product.images.len());
                    let category_filter = ListFilters {
                        category_id: product.category.id.clone(),
                        ..ListFilters::default()
                    };
                    let category_link = format!("/products?{}", category_filter.to_query());
                    rsx! {
                        div {
                            class: "card detail",
                            div {
                                class: "card-body",
                                nav {
                                    class: "breadcrumbs",
                                    Link { to: "/products", "Products" }
                                    span { "/" }
                                    span { title: "{product.name}", "{product.name}" }
                                }

                                div {
                                    class: "detail-grid",
                                    div {
                                        if let Some(main) = product.images.get(active) {
                                            img {
                                                class: "detail-image",
                                                src: "{main}",
                                                alt: "{product.name}",
                                                loading: "lazy",
                                            }
                                            if product.images.len() > 1 {
                                                div {
                                                    class: "thumbnails",
                                                    for (idx, src) in product.images.iter().take(MAX_THUMBNAILS).cloned().enumerate() {
                                                        img {
                                                            key: "{src}{idx}",
                                                            class: if idx == active { "selected" } else { "" },
                                                            src: "{src}",
                                                            alt: "{product.name} thumbnail {idx + 1}",
                                                            onclick: move |_| active_image.set(idx),
                                                        }
                                                    }
                                                }
                                            }
                                        } else {
                                            div { class: "detail-image no-image", "No image" }
                                        }
                                    }

                                    div {
                                        class: "detail-info",
                                        div {
                                            class: "detail-heading",
                                            div {
                                                h1 { class: "card-title", "{product.name}" }
                                                div {
                                                    class: "detail-meta",
                                                    if !product.category.name.is_empty() {
                                                        Link {
                                                            to: category_link,
                                                            class: "chip",
                                                            "{product.category.name}"
                                                        }
                                                    }
                                                    span { class: "muted", "SKU: {product.slug}" }
                                                }
                                            }
                                            Link {
                                                to: "/products/{product.slug}/edit",
                                                class: "btn btn-ghost",
                                                Icon { icon: FaPen, width: 14, height: 14 }
                                                "Edit"
                                            }
                                        }
                                        div { class: "price price-large", "{format_usd(product.price)}" }
                                        if !product.description.is_empty() {
                                            p { class: "description", "{product.description}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
