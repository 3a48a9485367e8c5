use std::time::Duration;

use catalog::filters::SortKey;
use catalog::list::PAGE_SIZE_OPTIONS;
use catalog::{Category, ListParams, ListView, Product, SearchState};
use dioxus::prelude::*;

use super::ModalOverlay;
use crate::icons::{FaMagnifyingGlass, FaXmark};
use crate::{platform, use_app, Icon, ProductCard, CATALOG_CSS};

const SEARCH_INPUT_ID: &str = "product-search";

/// Focus the search box on `/` unless a modifier is held or it already has focus.
const SEARCH_SHORTCUT_JS: &str = r#"
if (!window.__productSearchShortcut) {
    window.__productSearchShortcut = true;
    window.addEventListener("keydown", (e) => {
        if (e.key !== "/" || e.ctrlKey || e.metaKey || e.altKey) return;
        const input = document.getElementById("product-search");
        if (!input || document.activeElement === input) return;
        e.preventDefault();
        input.focus();
    });
}
"#;

/// Browsable product grid with search, filters, pagination and delete.
///
/// `initial_query` is the page URL's query string; it seeds the filters once
/// on mount. Afterwards the filters are mirrored back into the URL.
#[component]
pub fn ProductListView(initial_query: String) -> Element {
    let app = use_app();
    let list_config = use_hook(|| app.config().list);
    let debounce = Duration::from_millis(list_config.search_debounce_ms);
    let page_size_options = if list_config.page_size_options.is_empty() {
        PAGE_SIZE_OPTIONS.to_vec()
    } else {
        list_config.page_size_options.clone()
    };

    let mut view = use_signal(|| ListView::from_query(&initial_query, list_config.page_size));
    let mut search = use_signal(SearchState::new);
    let mut pending_delete = use_signal(|| Option::<Product>::None);

    let list_params = use_memo(move || view.read().list_params());
    let filters = use_memo(move || view.read().filters().clone());

    // The list page; skipped entirely while signed out
    let mut page = use_resource(move || {
        let authed = app.session.read().is_authenticated();
        let params = list_params();
        let client = app.client();
        async move {
            if !authed {
                return None;
            }
            match client.get_products(&params).await {
                Ok(products) => Some(products),
                Err(e) => {
                    platform::warn(&format!("Failed to load products: {e}"));
                    None
                }
            }
        }
    });

    let categories = use_resource(move || {
        let authed = app.session.read().is_authenticated();
        let client = app.client();
        async move {
            if !authed {
                return Vec::new();
            }
            client
                .get_categories(&ListParams::default())
                .await
                .unwrap_or_else(|e| {
                    platform::warn(&format!("Failed to load categories: {e}"));
                    Vec::new()
                })
        }
    });

    use_effect(move || {
        if let Some(Some(products)) = &*page.read() {
            view.write().record_page(products.len());
        }
    });

    use_effect(move || {
        let query = filters.read().merge_into_query(&platform::location_query());
        platform::replace_query(&query);
    });

    use_effect(|| {
        let _ = document::eval(SEARCH_SHORTCUT_JS);
    });

    let handle_search_input = move |evt: FormEvent| {
        let text = evt.value();
        view.write().set_query(text.clone());
        if text.trim().is_empty() {
            search.write().cancel();
            return;
        }
        let generation = search.write().keystroke();
        spawn(async move {
            platform::sleep(debounce).await;
            if !search.peek().is_current(generation) {
                return;
            }
            let Some(ticket) = search.write().begin(&text) else {
                return;
            };
            match app.client().search_products(&ticket.text).await {
                Ok(results) => {
                    search.write().accept(&ticket, results);
                }
                Err(e) => {
                    search.write().fail(&ticket);
                    platform::warn(&format!("Search for {:?} failed: {e}", ticket.text));
                }
            }
        });
    };

    let handle_confirm_delete = move |_| {
        let Some(product) = pending_delete.write().take() else {
            return;
        };
        view.write().mark_removed(&product.id);
        spawn(async move {
            match app.client().delete_product(&product.id).await {
                Ok(()) => page.restart(),
                Err(e) => {
                    platform::warn(&format!("Failed to delete {}: {e}", product.name));
                    view.write().restore(&product.id);
                }
            }
        });
    };

    let authed = app.session.read().is_authenticated();
    let current = view.read().clone();
    let page_items = page.read().clone().flatten();
    let searching = search.read().is_searching();
    let items = current.visible(page_items.as_deref(), search.read().results());
    let loading = authed && (page.read().is_none() || searching);
    let category_list = categories.read().clone().unwrap_or_default();

    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        main {
            class: "container product-list",

            div {
                class: "toolbar",
                div {
                    class: "field search-field",
                    label { class: "label", r#for: SEARCH_INPUT_ID, "Search" }
                    div {
                        class: "search-box",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        input {
                            id: SEARCH_INPUT_ID,
                            class: "input",
                            placeholder: "Search products",
                            value: "{current.query()}",
                            oninput: handle_search_input,
                        }
                        if !current.query().is_empty() {
                            button {
                                class: "search-clear",
                                aria_label: "Clear search",
                                onclick: move |_| {
                                    view.write().set_query("");
                                    search.write().cancel();
                                },
                                Icon { icon: FaXmark, width: 12, height: 12 }
                            }
                        }
                        span {
                            class: "search-count",
                            if searching { "…" } else { "{items.len()}" }
                        }
                    }
                }

                FilterControls {
                    categories: category_list,
                    category_id: current.filters().category_id.clone(),
                    min_price: current.filters().min_price.clone(),
                    max_price: current.filters().max_price.clone(),
                    sort: current.filters().sort,
                    limit: current.limit(),
                    page_size_options,
                    show_reset: current.has_active_filters(),
                    on_category: move |id: String| {
                        view.write().update_filters(|f| f.category_id = id);
                    },
                    on_min_price: move |v: String| {
                        view.write().update_filters(|f| f.min_price = v);
                    },
                    on_max_price: move |v: String| {
                        view.write().update_filters(|f| f.max_price = v);
                    },
                    on_sort: move |sort: SortKey| {
                        view.write().update_filters(|f| f.sort = sort);
                    },
                    on_limit: move |limit: u32| view.write().set_limit(limit),
                    on_reset: move |_| {
                        view.write().reset();
                        search.write().cancel();
                    },
                }
            }

            if loading {
                div {
                    class: "grid-list",
                    for i in 0..current.limit() {
                        div {
                            key: "{i}",
                            class: "card",
                            div { class: "skeleton skeleton-image" }
                            div {
                                class: "card-body",
                                div { class: "skeleton skeleton-title" }
                                div { class: "skeleton skeleton-line" }
                            }
                        }
                    }
                }
            } else if items.is_empty() {
                div {
                    class: "card empty-state",
                    if authed {
                        p { "No products found." }
                        p { class: "muted", "Try adjusting your search or filters." }
                    } else {
                        p { "Please login to view products." }
                        Link { to: "/login", class: "btn btn-primary", "Login" }
                    }
                }
            } else {
                div {
                    class: "grid-list",
                    for product in items {
                        ProductCard {
                            key: "{product.id}",
                            product: product.clone(),
                            on_request_delete: move |p: Product| pending_delete.set(Some(p)),
                            on_select_category: move |id: String| {
                                view.write().update_filters(|f| f.category_id = id);
                            },
                        }
                    }
                }
            }

            div {
                class: "pagination",
                button {
                    class: "btn btn-ghost",
                    disabled: !current.can_prev(),
                    onclick: move |_| view.write().prev_page(),
                    "Previous"
                }
                span { "Page {current.page() + 1}" }
                button {
                    class: "btn btn-ghost",
                    disabled: !current.can_next(),
                    onclick: move |_| {
                        view.write().next_page();
                        let _ = document::eval("window.scrollTo({ top: 0, behavior: 'smooth' });");
                    },
                    "Next"
                }
            }

            if let Some(product) = pending_delete() {
                ModalOverlay {
                    title: "Delete product",
                    on_close: move |_| pending_delete.set(None),
                    div {
                        class: "modal-body",
                        "Are you sure you want to delete "
                        strong { "{product.name}" }
                        "? This action cannot be undone."
                    }
                    div {
                        class: "modal-actions",
                        button {
                            class: "btn btn-ghost",
                            onclick: move |_| pending_delete.set(None),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-danger",
                            onclick: handle_confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterControls(
    categories: Vec<Category>,
    category_id: String,
    min_price: String,
    max_price: String,
    sort: SortKey,
    limit: u32,
    page_size_options: Vec<u32>,
    show_reset: bool,
    on_category: EventHandler<String>,
    on_min_price: EventHandler<String>,
    on_max_price: EventHandler<String>,
    on_sort: EventHandler<SortKey>,
    on_limit: EventHandler<u32>,
    on_reset: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "filters",
            div {
                class: "field",
                label { class: "label", "Category" }
                select {
                    class: "input",
                    value: "{category_id}",
                    onchange: move |evt| on_category.call(evt.value()),
                    option { value: "", "All" }
                    for c in categories {
                        option {
                            key: "{c.id}",
                            value: "{c.id}",
                            selected: c.id == category_id,
                            "{c.name}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { class: "label", "Price" }
                div {
                    class: "price-range",
                    input {
                        class: "input",
                        r#type: "number",
                        inputmode: "numeric",
                        min: "0",
                        placeholder: "Min",
                        value: "{min_price}",
                        oninput: move |evt| on_min_price.call(evt.value()),
                    }
                    span { "-" }
                    input {
                        class: "input",
                        r#type: "number",
                        inputmode: "numeric",
                        min: "0",
                        placeholder: "Max",
                        value: "{max_price}",
                        oninput: move |evt| on_max_price.call(evt.value()),
                    }
                }
            }
            div {
                class: "field",
                label { class: "label", "Sort" }
                select {
                    class: "input",
                    value: "{sort.as_str()}",
                    onchange: move |evt| on_sort.call(SortKey::parse_lossy(&evt.value())),
                    for key in SortKey::ALL {
                        option {
                            key: "{key.as_str()}",
                            value: "{key.as_str()}",
                            selected: key == sort,
                            "{key.label()}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { class: "label", "Per page" }
                select {
                    class: "input",
                    value: "{limit}",
                    onchange: move |evt| {
                        if let Ok(limit) = evt.value().parse::<u32>() {
                            on_limit.call(limit);
                        }
                    },
                    for size in page_size_options {
                        option {
                            key: "{size}",
                            value: "{size}",
                            selected: size == limit,
                            "{size}"
                        }
                    }
                }
            }
            if show_reset {
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| on_reset.call(()),
                    "Reset"
                }
            }
        }
    }
}
