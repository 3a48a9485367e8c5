use catalog::login::{sign_in_label, validate_email, SIGN_IN_FAILED};
use dioxus::prelude::*;

use crate::{use_app, CATALOG_CSS};

/// Email sign-in form.
///
/// `on_signed_in` fires once a session exists, whether it was just created or
/// restored from storage.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let app = use_app();
    let mut email = use_signal(String::new);
    let mut email_error = use_signal(|| Option::<&'static str>::None);
    let mut failed = use_signal(|| false);
    let mut busy = use_signal(|| false);

    use_effect(move || {
        if (app.hydrated)() && app.session.read().is_authenticated() {
            on_signed_in.call(());
        }
    });

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let address = match validate_email(&email()) {
            Ok(address) => {
                email_error.set(None);
                address
            }
            Err(message) => {
                email_error.set(Some(message));
                return;
            }
        };

        busy.set(true);
        failed.set(false);
        if let Err(e) = app.sign_in(&address).await {
            tracing::warn!("Sign-in failed: {e}");
            failed.set(true);
        }
        busy.set(false);
    };

    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        div {
            class: "container login",
            div {
                class: "card login-card",
                div {
                    class: "card-body",
                    h1 { class: "card-title", "Welcome back" }
                    p { class: "muted", "Sign in with your email to continue." }
                    form {
                        onsubmit: handle_submit,
                        div {
                            class: "field",
                            label { class: "label", r#for: "login-email", "Email" }
                            input {
                                id: "login-email",
                                class: "input",
                                r#type: "email",
                                placeholder: "you@example.com",
                                autocomplete: "email",
                                value: "{email}",
                                oninput: move |evt| email.set(evt.value()),
                            }
                            if let Some(message) = email_error() {
                                p { class: "error", "{message}" }
                            }
                        }
                        button {
                            class: "btn btn-primary btn-block",
                            r#type: "submit",
                            disabled: busy(),
                            "{sign_in_label(busy())}"
                        }
                        if failed() {
                            p { class: "error", "{SIGN_IN_FAILED}" }
                        }
                    }
                }
            }
        }
    }
}
