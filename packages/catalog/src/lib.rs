//! Client-side catalog logic shared by every frontend: wire models, list and
//! form view-models, search sequencing, configuration, and session persistence.
//! Nothing in here depends on Dioxus.

pub mod config;
pub mod filters;
pub mod form;
pub mod list;
pub mod login;
pub mod models;
pub mod search;
pub mod session;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::CatalogConfig;
pub use filters::{ListFilters, SortKey};
pub use form::{FieldErrors, FormMode, ProductForm, Submission, UploadProgress};
pub use list::{derive_list, ListView};
pub use login::validate_email;
pub use models::{
    AuthResponse, Category, CreateProductInput, ListParams, Product, UpdateProductInput,
};
pub use search::{SearchState, SearchTicket};
pub use session::{KeyValueStore, Session, SessionPersistence, SessionStoreError};
