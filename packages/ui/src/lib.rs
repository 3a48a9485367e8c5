//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod format;
pub mod platform;

mod store;
pub use store::{load_config, make_session_store};

mod state;
pub use state::{use_app, AppProvider, AppState};

pub mod views;

pub const CATALOG_CSS: Asset = asset!("/assets/styling/catalog.css");

mod header;
pub use header::Header;

mod product_card;
pub use product_card::ProductCard;

mod product_form;
pub use product_form::ProductFormView;
