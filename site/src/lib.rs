//! Arthuro Visuals portfolio service.
//!
//! Serves the site's pages as JSON view models over axum, relays the contact
//! and booking forms, and exposes the bundled images directory.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::{cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer};
use tracing::info;

pub mod carousel;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod theme;
pub mod views;

use config::AppConfig;
use routes::{
    about_handler, booking_submit_handler, category_handler, contact_page_handler,
    contact_submit_handler, home_handler, sub_category_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let images = ServeDir::new(&state.config.images_dir);

    Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/contact", get(contact_page_handler).post(contact_submit_handler))
        .route("/contact/booking", post(booking_submit_handler))
        .nest_service(gallery::catalog::IMAGES_ROUTE, images)
        .route("/:category", get(category_handler))
        .route("/:category/:sub_category", get(sub_category_handler))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("accept-ch"),
            HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"),
        ))
        .layer(cors)
        .with_state(state)
}

/// Serves on an already bound listener until `shutdown` resolves, then stops
/// the carousel.
pub async fn run<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let theme_log = theme::log_changes(state.theme.as_ref());
    let app = router(state.clone());
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;

    theme_log.abort();
    state.rotation.stop().await;
    served
}

pub async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Initializing state...");
    let address = config.bind_addr.clone();
    let state = AppState::new(config);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", listener.local_addr()?);

    run(listener, state, shutdown_signal()).await?;
    info!("Server shut down");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
