use dioxus::prelude::*;

use ui::{AppProvider, Header};
use views::{EditProduct, Home, Login, NewProduct, ProductDetail, Products};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/products?:..query")]
        Products { query: String },
        #[route("/products/new")]
        NewProduct {},
        #[route("/products/:slug")]
        ProductDetail { slug: String },
        #[route("/products/:slug/edit")]
        EditProduct { slug: String },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the async runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = api::MediaConfig::from_env() {
        tracing::warn!("Image uploads are disabled: {e}");
    }

    // Server functions (`/api/cloudinary/sign`) are registered by the Dioxus router
    let router = axum::Router::new().serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the server address");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            config: ui::load_config(),
            Router::<Route> {}
        }
    }
}

/// Header above every page.
#[component]
fn Shell() -> Element {
    rsx! {
        Header {}
        Outlet::<Route> {}
    }
}
