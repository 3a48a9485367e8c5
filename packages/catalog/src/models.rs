//! # Domain models for products and categories
//!
//! Wire types exchanged with the remote catalog API. Field names follow the
//! API's camelCase JSON, so every struct carries `#[serde(rename_all = "camelCase")]`.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Product`] | A product as returned by the API, with its [`Category`] embedded by value. |
//! | [`Category`] | A product category. Referenced by products, not owned by them. |
//! | [`CreateProductInput`] | Body of `POST /products`. |
//! | [`UpdateProductInput`] | Body of `PUT /products/:id`; absent fields are omitted. |
//! | [`AuthResponse`] | Body returned by `POST /auth`. |
//! | [`ListParams`] | Query parameters of the paginated list endpoints. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image shown for products that have no images yet.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400";

/// A product category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// A product in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ordered image URLs. The first one is the canonical image.
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    /// Unique, human-readable route key.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Category,
}

impl Product {
    /// The canonical image, or the placeholder when the product has none.
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Route of the product detail page.
    pub fn detail_path(&self) -> String {
        format!("/products/{}", self.slug)
    }
}

/// Request body for creating a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub category_id: String,
}

/// Request body for updating a product. Only present fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl From<CreateProductInput> for UpdateProductInput {
    fn from(input: CreateProductInput) -> Self {
        Self {
            name: Some(input.name),
            description: Some(input.description),
            images: Some(input.images),
            price: Some(input.price),
            category_id: Some(input.category_id),
        }
    }
}

/// Response of `POST /auth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Query parameters for `GET /products` and `GET /categories`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl ListParams {
    /// Parameters for one page of `limit` items.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            offset: Some(page * limit),
            limit: Some(limit),
            category_id: None,
        }
    }

    /// Builder method to restrict the page to a category. Empty ids are ignored.
    pub fn with_category(mut self, category_id: &str) -> Self {
        self.category_id = if category_id.is_empty() {
            None
        } else {
            Some(category_id.to_string())
        };
        self
    }
}
