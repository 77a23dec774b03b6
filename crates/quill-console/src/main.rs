#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
const DEFAULT_CONFIG_PATH: &str = "config.example.toml";

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::net::SocketAddr;

    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use quill_api::state::AppState;
    use quill_types::ApiBase;
    use quill_ui::{shell, App};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    // Initialize tracing
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse config path from args
    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into())
    } else {
        DEFAULT_CONFIG_PATH.into()
    };

    let appConfig = quill_api::config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={} api={}",
        appConfig.server.addr(),
        appConfig.api.base_url
    );

    let apiBase = ApiBase(appConfig.api.base_url.clone());
    let appState = AppState {
        api_base: apiBase.clone(),
    };

    // Get Leptos configuration
    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = match appConfig.server.addr().parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!(
                "invalid bind address {}: {e}, using {}",
                appConfig.server.addr(),
                leptosOptions.site_addr
            );
            leptosOptions.site_addr
        }
    };

    // Generate route list from Leptos App
    let routes = generate_route_list(App);

    // Pages get the API base through context so server functions can hand it
    // to the browser; /login and /healthz are plain axum routes.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let apiBase = apiBase.clone();
                move || {
                    provide_context(apiBase.clone());
                }
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(quill_api::frontend_router(appState))
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
