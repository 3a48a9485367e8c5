//! Application state shared through context.
//!
//! [`AppProvider`] creates one [`AppState`] at start-up: the API client (with
//! its response cache), the signed-in [`Session`], and the loaded
//! [`CatalogConfig`]. The persisted session is rehydrated once on mount;
//! `hydrated` stays `false` until that finishes, and the children are not
//! rendered before then, so no view shows a signed-out state for a session
//! that is still loading.

use api::{ApiClient, ApiResult};
use catalog::{CatalogConfig, Session};
use dioxus::prelude::*;

use crate::store::make_session_store;

#[derive(Clone, Copy, PartialEq)]
pub struct AppState {
    client: Signal<ApiClient>,
    config: Signal<CatalogConfig>,
    pub session: Signal<Session>,
    pub hydrated: Signal<bool>,
}

impl AppState {
    /// A handle to the shared client. Clones share the token and cache.
    pub fn client(&self) -> ApiClient {
        self.client.peek().clone()
    }

    pub fn config(&self) -> CatalogConfig {
        self.config.peek().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Exchange `email` for a token, then remember and persist the session.
    pub async fn sign_in(mut self, email: &str) -> ApiResult<()> {
        let client = self.client();
        let auth = client.login(email).await?;
        let session = Session::signed_in(auth.token, email);
        client.set_session(&session);
        if let Err(e) = make_session_store().save(&session).await {
            crate::platform::warn(&format!("Failed to persist session: {e}"));
        }
        tracing::info!("Signed in as {email}");
        self.session.set(session);
        Ok(())
    }

    /// Forget the session, drop every cached response and the persisted key.
    pub async fn sign_out(mut self) {
        self.client().clear_session();
        if let Err(e) = make_session_store().clear().await {
            crate::platform::warn(&format!("Failed to clear persisted session: {e}"));
        }
        self.session.set(Session::signed_out());
        tracing::info!("Signed out");
    }
}

/// Get the application state provided by [`AppProvider`].
pub fn use_app() -> AppState {
    use_context::<AppState>()
}

/// Provider component that owns the application state.
#[component]
pub fn AppProvider(config: CatalogConfig, children: Element) -> Element {
    let client = use_signal(|| ApiClient::from_config(&config));
    let config = use_signal(|| config);
    let mut session = use_signal(Session::signed_out);
    let mut hydrated = use_signal(|| false);

    // Rehydrate the persisted session on mount
    let _ = use_resource(move || async move {
        let restored = make_session_store().load().await;
        client.peek().set_session(&restored);
        session.set(restored);
        hydrated.set(true);
    });

    use_context_provider(|| AppState {
        client,
        config,
        session,
        hydrated,
    });

    // Nothing renders until the persisted session is known
    rsx! {
        if hydrated() {
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    static CHILD_RENDERED: AtomicBool = AtomicBool::new(false);

    #[component]
    fn Child() -> Element {
        CHILD_RENDERED.store(true, Ordering::SeqCst);
        rsx! { "ready" }
    }

    fn Root() -> Element {
        rsx! {
            AppProvider { config: CatalogConfig::default(), Child {} }
        }
    }

    #[test]
    fn test_children_wait_for_session_restore() {
        let mut dom = VirtualDom::new(Root);
        dom.rebuild_in_place();
        // the restore task has not run yet
        assert!(!CHILD_RENDERED.load(Ordering::SeqCst));
    }
}
