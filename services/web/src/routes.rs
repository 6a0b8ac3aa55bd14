use crate::assets::serve_asset;
use crate::error::PageError;
use crate::infra::{AppState, Observability};
use crate::pages;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use realty_listings::inquiries::{InquirySubmission, IntakeError};
use realty_listings::listings::PropertyView;
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Page routes plus the `/public` asset mount and probe endpoints.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/about", get(about_page))
        .route("/contact", get(contact_page))
        .route("/properties/:id", get(property_page))
        .route("/properties/:id/inquiries", post(submit_inquiry))
        .route("/public/*path", get(serve_asset))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found_page)
        .method_not_allowed_fallback(not_found_page)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub(crate) async fn index_page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let properties = state.catalog.list_all().await?;
    let views: Vec<PropertyView> = properties.iter().map(|property| property.view()).collect();
    Ok(Html(pages::index(&views)))
}

pub(crate) async fn property_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let property = state.catalog.get_by_id(&id).await?;
    Ok(Html(pages::property_detail(&property.view(), None)))
}

pub(crate) async fn submit_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(submission): Form<InquirySubmission>,
) -> Result<(StatusCode, Html<String>), PageError> {
    let property = state.catalog.get_by_id(&id).await?;
    let view = property.view();

    match state.intake.create(&property.id.to_string(), submission).await {
        Ok(inquiry) => Ok((
            StatusCode::CREATED,
            Html(pages::inquiry_received(&view, &inquiry)),
        )),
        Err(IntakeError::Validation(err)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::property_detail(&view, Some(&err))),
        )),
        Err(IntakeError::Storage(err)) => Err(err.into()),
    }
}

pub(crate) async fn about_page() -> Html<String> {
    Html(pages::about())
}

pub(crate) async fn contact_page() -> Html<String> {
    Html(pages::contact())
}

pub(crate) async fn not_found_page() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found("Not Found", "404 - Not Found")),
    )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(
    Extension(observability): Extension<Observability>,
) -> impl IntoResponse {
    let ready = observability
        .readiness
        .load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(
    Extension(observability): Extension<Observability>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        observability.metrics.render(),
    )
}
