use api::{MediaUploader, UploadFile};
use catalog::{FieldErrors, ListParams, Product, ProductForm, Submission, UploadProgress};
use dioxus::prelude::*;

use crate::icons::{FaCamera, FaXmark};
use crate::{platform, use_app, Icon};

const FILE_INPUT_ID: &str = "product-images";
const UPLOAD_FAILED: &str = "Failed to upload an image. Please try again.";
const SAVE_FAILED: &str = "Failed to save the product. Please try again.";

/// Create or edit form for a product.
///
/// With `product` set the form edits it, otherwise it creates a new one.
/// `on_saved` receives the route to open once the server accepted the change.
#[component]
pub fn ProductFormView(product: Option<Product>, on_saved: EventHandler<String>) -> Element {
    let app = use_app();
    let mut form = use_signal(|| {
        product
            .as_ref()
            .map(ProductForm::from_product)
            .unwrap_or_default()
    });
    let mut errors = use_signal(FieldErrors::default);
    let mut progress = use_signal(UploadProgress::default);
    let mut busy = use_signal(|| false);
    let mut notice = use_signal(|| Option::<&'static str>::None);

    let categories = use_resource(move || {
        let client = app.client();
        async move {
            client
                .get_categories(&ListParams::default())
                .await
                .unwrap_or_else(|e| {
                    platform::warn(&format!("Failed to load categories: {e}"));
                    Vec::new()
                })
        }
    });

    let handle_files = move |evt: FormEvent| async move {
        let files = evt.files();
        if files.is_empty() {
            return;
        }
        progress.write().begin(files.len());

        let mut picked = Vec::with_capacity(files.len());
        for file in files {
            match file.read_bytes().await {
                Ok(bytes) => picked.push(UploadFile {
                    name: file.name(),
                    mime: file.content_type(),
                    bytes: bytes.to_vec(),
                }),
                Err(e) => {
                    platform::warn(&format!("Could not read {}: {e}", file.name()));
                    progress.write().finish_one();
                    notice.set(Some(UPLOAD_FAILED));
                }
            }
        }

        let upload = app.config().upload;
        let uploader = MediaUploader::from_config(&upload);
        let folder = upload.folder.clone();
        uploader
            .upload_all(
                picked,
                move || api::request_signature(folder.clone()),
                |result| {
                    progress.write().finish_one();
                    match result {
                        Ok(url) => form.write().append_image(url),
                        Err(e) => {
                            platform::warn(&format!("Image upload failed: {e}"));
                            notice.set(Some(UPLOAD_FAILED));
                        }
                    }
                },
            )
            .await;
    };

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let submission = form.read().submission();
        let submission = match submission {
            Ok(submission) => {
                errors.set(FieldErrors::default());
                submission
            }
            Err(field_errors) => {
                tracing::debug!("Product form invalid: {field_errors}");
                errors.set(field_errors);
                return;
            }
        };

        busy.set(true);
        notice.set(None);
        let client = app.client();
        let saved = match submission {
            Submission::Create(body) => client.create_product(&body).await,
            Submission::Update { id, body } => client.update_product(&id, &body).await,
        };
        busy.set(false);

        match saved {
            Ok(saved) => {
                let route = form.read().redirect_after(&saved);
                on_saved.call(route);
            }
            Err(e) => {
                platform::warn(&format!("Saving product failed: {e}"));
                notice.set(Some(SAVE_FAILED));
            }
        }
    };

    let state = form.read().clone();
    let field_errors = errors.read().clone();
    let category_list = categories.read().clone().unwrap_or_default();
    let upload_label = progress.read().label();
    let main_preview = state.main_preview().map(str::to_string);

    rsx! {
        form {
            class: "product-form",
            onsubmit: handle_submit,

            if let Some(src) = main_preview.clone() {
                img { class: "form-preview", src: "{src}", alt: "Preview" }
            }

            div {
                class: "field",
                label { class: "label", "Name" }
                input {
                    class: "input",
                    value: "{state.name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
                FieldError { message: field_errors.name.clone() }
            }

            div {
                class: "field",
                label { class: "label", "Description" }
                textarea {
                    class: "input",
                    rows: "4",
                    value: "{state.description}",
                    oninput: move |evt| form.write().description = evt.value(),
                }
                FieldError { message: field_errors.description.clone() }
            }

            div {
                class: "form-row",
                div {
                    class: "field",
                    label { class: "label", "Price" }
                    input {
                        class: "input",
                        r#type: "number",
                        step: "0.01",
                        value: "{state.price}",
                        oninput: move |evt| form.write().price = evt.value(),
                    }
                    FieldError { message: field_errors.price.clone() }
                }
                div {
                    class: "field",
                    label { class: "label", "Category" }
                    select {
                        class: "input",
                        value: "{state.category_id}",
                        onchange: move |evt| form.write().category_id = evt.value(),
                        option { value: "", "Select a category" }
                        for c in category_list {
                            option {
                                key: "{c.id}",
                                value: "{c.id}",
                                selected: c.id == state.category_id,
                                "{c.name}"
                            }
                        }
                    }
                    FieldError { message: field_errors.category_id.clone() }
                }
            }

            div {
                class: "field",
                div {
                    class: "images-header",
                    label { class: "label", "Images" }
                    input {
                        id: FILE_INPUT_ID,
                        class: "hidden",
                        r#type: "file",
                        multiple: true,
                        accept: "image/*",
                        onchange: handle_files,
                    }
                    label {
                        class: "btn btn-ghost",
                        r#for: FILE_INPUT_ID,
                        "{upload_label}"
                    }
                }
                FieldError { message: field_errors.images.clone() }
                for (i, message) in field_errors.image_items.iter().cloned() {
                    p { key: "{i}", class: "error", "{message}" }
                }
            }

            div {
                class: "thumbnails",
                for (idx, src) in state.images.iter().cloned().enumerate() {
                    div {
                        key: "{src}{idx}",
                        class: "thumbnail",
                        img {
                            class: if main_preview.as_deref() == Some(src.as_str()) { "selected" } else { "" },
                            src: "{src}",
                            alt: "preview thumbnail {idx + 1}",
                            onclick: {
                                let src = src.clone();
                                move |_| form.write().select_preview(&src)
                            },
                        }
                        button {
                            r#type: "button",
                            class: "thumbnail-remove",
                            title: "Remove image",
                            onclick: move |evt: Event<MouseData>| {
                                evt.stop_propagation();
                                form.write().remove_image(idx);
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
                label {
                    class: "thumbnail-add",
                    r#for: FILE_INPUT_ID,
                    title: "Add images",
                    Icon { icon: FaCamera, width: 18, height: 18 }
                    span { "{upload_label}" }
                }
            }

            if let Some(message) = notice() {
                p { class: "error", "{message}" }
            }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: busy(),
                "{state.submit_label(busy())}"
            }
        }
    }
}

#[component]
fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "error", "{message}" }
        }
    }
}
