use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Path, State},
    http::{header::REFRESH, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gallery::{featured_photos, GalleryOutcome};
use notify::{BookingRequest, ContactMessage, Delivery};

use crate::error::SiteError;
use crate::state::AppState;
use crate::theme::{self, Theme};
use crate::views::{
    navigation, AboutView, Appearance, ContactView, GalleryView, HomeView, RedirectView,
    SubmissionView, SITE_NAME,
};

const ANONYMOUS_CLIENT: &str = "anonymous";

fn request_theme(state: &AppState, headers: &HeaderMap) -> Theme {
    theme::resolve(headers, state.theme.as_ref())
}

/// Cooldown key for a submission: first forwarded hop, then the peer address.
fn client_key(headers: &HeaderMap, peer: Option<ConnectInfo<SocketAddr>>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string())
}

pub async fn home_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<HomeView> {
    let featured = featured_photos(state.resolver.source()).await;
    let hero_index = state.rotation.index_for(featured.len());
    Json(HomeView {
        site: SITE_NAME,
        appearance: Appearance::new(request_theme(&state, &headers), None),
        categories: navigation(),
        featured,
        hero_index,
        previews: state.catalog.previews(),
    })
}

pub async fn about_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<AboutView> {
    Json(AboutView::new(Appearance::new(
        request_theme(&state, &headers),
        None,
    )))
}

pub async fn contact_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ContactView> {
    Json(ContactView::new(
        Appearance::new(request_theme(&state, &headers), None),
        state.contact.cooldown().as_secs(),
    ))
}

fn submission_response(delivery: Delivery) -> Json<SubmissionView> {
    // Honeypot hits get the same answer as real deliveries.
    if delivery == Delivery::Discarded {
        tracing::debug!("Reporting success for a discarded submission");
    }
    Json(SubmissionView {
        status: "sent",
        message: "Thanks! Your message is on its way.",
    })
}

pub async fn contact_submit_handler(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<SubmissionView>, SiteError> {
    let Json(message) = payload.map_err(|e| SiteError::MalformedPayload(e.body_text()))?;
    let client = client_key(&headers, peer);
    let delivery = state.contact.submit(&client, message).await?;
    Ok(submission_response(delivery))
}

pub async fn booking_submit_handler(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<SubmissionView>, SiteError> {
    let Json(request) = payload.map_err(|e| SiteError::MalformedPayload(e.body_text()))?;
    let client = client_key(&headers, peer);
    let delivery = state.booking.submit(&client, request).await?;
    Ok(submission_response(delivery))
}

pub async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    headers: HeaderMap,
) -> Response {
    gallery_response(&state, &headers, &category, None).await
}

pub async fn sub_category_handler(
    State(state): State<Arc<AppState>>,
    Path((category, sub_category)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    gallery_response(&state, &headers, &category, Some(&sub_category)).await
}

async fn gallery_response(
    state: &AppState,
    headers: &HeaderMap,
    category: &str,
    sub_category: Option<&str>,
) -> Response {
    let outcome = state.resolver.resolve(category, sub_category).await;
    match outcome {
        GalleryOutcome::NotFound {
            category,
            sub_category,
        } => {
            let delay = state.config.redirect_delay_secs;
            let redirect_to = format!("/{}", category);
            let mut response = (
                StatusCode::NOT_FOUND,
                Json(RedirectView {
                    status: "not_found",
                    category,
                    sub_category,
                    redirect_to: redirect_to.clone(),
                    delay_secs: delay,
                }),
            )
                .into_response();
            match HeaderValue::from_str(&format!("{}; url={}", delay, redirect_to)) {
                Ok(value) => {
                    response.headers_mut().insert(REFRESH, value);
                }
                Err(e) => tracing::warn!(error = %e, "Redirect target is not a valid header"),
            }
            response
        }
        outcome => Json(GalleryView::new(
            request_theme(state, headers),
            outcome,
            sub_category,
        ))
        .into_response(),
    }
}
