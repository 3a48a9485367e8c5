//! Browser plumbing with native fallbacks.
//!
//! On wasm these talk to `window`; elsewhere (server-side rendering, native
//! shells) they are inert so components can call them unconditionally.

use std::time::Duration;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Current query string without the leading `?`.
pub fn location_query() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.trim_start_matches('?').to_string())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Rewrite the query string in place without navigating.
pub fn replace_query(query: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        let url = if query.is_empty() {
            format!("{path}{hash}")
        } else {
            format!("{path}?{query}{hash}")
        };
        match window.history() {
            Ok(history) => {
                if let Err(e) =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
                {
                    warn(&format!("Failed to update URL: {e:?}"));
                }
            }
            Err(e) => warn(&format!("History unavailable: {e:?}")),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("Query is now {query:?}");
    }
}

/// Log a recoverable failure, echoing it to the browser console on wasm.
pub fn warn(message: &str) {
    tracing::warn!("{message}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
}
