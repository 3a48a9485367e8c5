//! # Product form view-model
//!
//! Holds the editable fields of a product, validates them, and turns them into
//! the request body for create or update. Validation runs before any request,
//! so an invalid form never reaches the network.

use crate::models::{CreateProductInput, Product, UpdateProductInput};

pub const NAME_REQUIRED: &str = "Name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const PRICE_NOT_NUMBER: &str = "Price must be a number";
pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";
pub const IMAGES_REQUIRED: &str = "At least one image is required";
pub const IMAGE_INVALID_URL: &str = "Image must be a valid URL";
pub const CATEGORY_REQUIRED: &str = "Category is required";

/// Whether the form creates a new product or edits an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Field-level validation messages. Empty means the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", self.count())]
pub struct FieldErrors {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    /// Error for the image list as a whole.
    pub images: Option<String>,
    /// Errors for individual image entries, by index.
    pub image_items: Vec<(usize, String)>,
    pub category_id: Option<String>,
}

impl FieldErrors {
    pub fn count(&self) -> usize {
        [
            &self.name,
            &self.description,
            &self.price,
            &self.images,
            &self.category_id,
        ]
        .iter()
        .filter(|e| e.is_some())
        .count()
            + self.image_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// A validated request, ready to send.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(CreateProductInput),
    Update { id: String, body: UpdateProductInput },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    pub mode: FormMode,
    pub name: String,
    pub description: String,
    /// Price as typed.
    pub price: String,
    pub images: Vec<String>,
    pub category_id: String,
    preview: Option<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// An empty form for a new product.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            description: String::new(),
            price: "0".to_string(),
            images: Vec::new(),
            category_id: String::new(),
            preview: None,
        }
    }

    /// A form seeded from an existing product.
    pub fn from_product(product: &Product) -> Self {
        let images: Vec<String> = product
            .images
            .iter()
            .filter(|u| !u.is_empty())
            .cloned()
            .collect();
        Self {
            mode: FormMode::Edit {
                id: product.id.clone(),
            },
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            preview: images.first().cloned(),
            images,
            category_id: product.category.id.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Label of the submit button.
    pub fn submit_label(&self, busy: bool) -> &'static str {
        match (self.is_edit(), busy) {
            (true, true) => "Saving...",
            (true, false) => "Save changes",
            (false, true) => "Creating...",
            (false, false) => "Create product",
        }
    }

    /// Add an uploaded image. The first one becomes the preview.
    pub fn append_image(&mut self, url: String) {
        if self.preview.is_none() {
            self.preview = Some(url.clone());
        }
        self.images.push(url);
    }

    /// Remove the image at `index`; the preview falls back to the first
    /// remaining image.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
            self.preview = self.images.first().cloned();
        }
    }

    pub fn select_preview(&mut self, url: &str) {
        self.preview = Some(url.to_string());
    }

    /// Image shown large above the form.
    pub fn main_preview(&self) -> Option<&str> {
        self.preview
            .as_deref()
            .or_else(|| self.images.iter().map(String::as_str).find(|u| !u.trim().is_empty()))
    }

    /// Validate all fields and build the request body.
    pub fn validate(&self) -> Result<CreateProductInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.is_empty() {
            errors.name = Some(NAME_REQUIRED.to_string());
        }
        if self.description.is_empty() {
            errors.description = Some(DESCRIPTION_REQUIRED.to_string());
        }

        let price = match parse_price(&self.price) {
            Some(p) if p > 0.0 => p,
            Some(_) => {
                errors.price = Some(PRICE_NOT_POSITIVE.to_string());
                0.0
            }
            None => {
                errors.price = Some(PRICE_NOT_NUMBER.to_string());
                0.0
            }
        };

        if self.images.is_empty() {
            errors.images = Some(IMAGES_REQUIRED.to_string());
        }
        for (i, image) in self.images.iter().enumerate() {
            if url::Url::parse(image).is_err() {
                errors.image_items.push((i, IMAGE_INVALID_URL.to_string()));
            }
        }

        if self.category_id.is_empty() {
            errors.category_id = Some(CATEGORY_REQUIRED.to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            images: self
                .images
                .iter()
                .filter(|u| !u.is_empty())
                .cloned()
                .collect(),
            price,
            category_id: self.category_id.clone(),
        })
    }

    /// Validate and wrap the body for the form's mode.
    pub fn submission(&self) -> Result<Submission, FieldErrors> {
        let body = self.validate()?;
        Ok(match &self.mode {
            FormMode::Create => Submission::Create(body),
            FormMode::Edit { id } => Submission::Update {
                id: id.clone(),
                body: body.into(),
            },
        })
    }

    /// Route to navigate to after the server accepted the submission.
    pub fn redirect_after(&self, saved: &Product) -> String {
        match self.mode {
            FormMode::Create => saved.detail_path(),
            FormMode::Edit { .. } => "/products".to_string(),
        }
    }
}

/// Empty text counts as zero.
fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Count of uploads still running in a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pending: usize,
}

impl UploadProgress {
    pub fn begin(&mut self, files: usize) {
        self.pending += files;
    }

    pub fn finish_one(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn label(&self) -> String {
        if self.pending > 0 {
            format!("Uploading ({})...", self.pending)
        } else {
            "Add images".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;

    fn filled() -> ProductForm {
        let mut form = ProductForm::new();
        form.name = "Runner".to_string();
        form.description = "Light shoe".to_string();
        form.price = "49.99".to_string();
        form.category_id = "c1".to_string();
        form.append_image("https://res.cloudinary.com/demo/a.png".to_string());
        form
    }

    #[test]
    fn test_empty_images_rejected() {
        let mut form = filled();
        form.images.clear();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.images.as_deref(), Some(IMAGES_REQUIRED));
        assert_eq!(errors.count(), 1);
        assert!(form.submission().is_err());
    }

    #[test]
    fn test_new_form_reports_every_field() {
        let errors = ProductForm::new().validate().unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(errors.description.as_deref(), Some(DESCRIPTION_REQUIRED));
        assert_eq!(errors.price.as_deref(), Some(PRICE_NOT_POSITIVE));
        assert_eq!(errors.images.as_deref(), Some(IMAGES_REQUIRED));
        assert_eq!(errors.category_id.as_deref(), Some(CATEGORY_REQUIRED));
    }

    #[test]
    fn test_price_rules() {
        let mut form = filled();
        form.price = "abc".to_string();
        assert_eq!(form.validate().unwrap_err().price.as_deref(), Some(PRICE_NOT_NUMBER));
        form.price = "-3".to_string();
        assert_eq!(form.validate().unwrap_err().price.as_deref(), Some(PRICE_NOT_POSITIVE));
        form.price = " 12.5 ".to_string();
        assert_eq!(form.validate().unwrap().price, 12.5);
    }

    #[test]
    fn test_invalid_image_url_is_reported_by_index() {
        let mut form = filled();
        form.images.push("not a url".to_string());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.image_items, vec![(1, IMAGE_INVALID_URL.to_string())]);
    }

    #[test]
    fn test_create_submission_and_redirect() {
        let form = filled();
        let Submission::Create(body) = form.submission().unwrap() else {
            panic!("expected create");
        };
        assert_eq!(body.category_id, "c1");
        assert_eq!(body.images.len(), 1);

        let saved = product("p9", "Runner", 49.99, "c1", 0);
        assert_eq!(form.redirect_after(&saved), "/products/runner-p9");
    }

    #[test]
    fn test_edit_seeds_fields_and_redirects_to_list() {
        let existing = product("p1", "Boot", 80.0, "c2", 0);
        let form = ProductForm::from_product(&existing);
        assert!(form.is_edit());
        assert_eq!(form.price, "80");
        assert_eq!(form.category_id, "c2");
        assert_eq!(form.main_preview(), Some("https://img.example/p1.png"));

        match form.submission().unwrap() {
            Submission::Update { id, body } => {
                assert_eq!(id, "p1");
                assert_eq!(body.price, Some(80.0));
                assert_eq!(body.category_id.as_deref(), Some("c2"));
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(form.redirect_after(&existing), "/products");
        assert_eq!(form.submit_label(false), "Save changes");
        assert_eq!(form.submit_label(true), "Saving...");
    }

    #[test]
    fn test_preview_follows_image_list() {
        let mut form = ProductForm::new();
        assert_eq!(form.main_preview(), None);
        form.append_image("https://img.example/1.png".to_string());
        form.append_image("https://img.example/2.png".to_string());
        assert_eq!(form.main_preview(), Some("https://img.example/1.png"));

        form.select_preview("https://img.example/2.png");
        assert_eq!(form.main_preview(), Some("https://img.example/2.png"));

        form.remove_image(0);
        assert_eq!(form.main_preview(), Some("https://img.example/2.png"));
        form.remove_image(0);
        assert_eq!(form.main_preview(), None);
        form.remove_image(5);
    }

    #[test]
    fn test_upload_progress_label() {
        let mut progress = UploadProgress::default();
        assert_eq!(progress.label(), "Add images");
        progress.begin(3);
        assert_eq!(progress.label(), "Uploading (3)...");
        progress.finish_one();
        progress.finish_one();
        progress.finish_one();
        progress.finish_one();
        assert_eq!(progress.pending(), 0);
    }
}
