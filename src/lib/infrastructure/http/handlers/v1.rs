//! Version 1 of the JSON API

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::{communication::delivery::EmailRelay, waitlist::WaitlistService},
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod emails;
pub mod stoplight;
pub mod uptime;

/// Routes mounted under `/api/v1`
pub fn router<W: WaitlistService, R: EmailRelay>() -> Router<AppState<W, R>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler::<W, R>))
        .route("/emails", post(emails::handler::<W, R>))
}
