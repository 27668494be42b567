//! Send email handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        communication::{delivery::EmailRelay, errors::MessageError, message::EmailMessage},
        waitlist::WaitlistService,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// The sender of an email
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SenderBody {
    /// Display name
    #[schema(example = "Grids")]
    pub name: Option<String>,

    /// Address
    #[schema(example = "hello@example.com")]
    pub email: String,
}

/// Send email request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailBody {
    /// The sender
    pub from: SenderBody,

    /// Recipients
    #[schema(example = json!(["jane@example.com"]))]
    pub to: Vec<String>,

    /// Carbon copy recipients
    #[serde(default)]
    pub cc: Vec<String>,

    /// Blind carbon copy recipients
    #[serde(default)]
    pub bcc: Vec<String>,

    /// Reply-to addresses; some providers only keep the first
    #[serde(default)]
    pub reply_to: Vec<String>,

    /// The subject line
    #[schema(example = "Welcome")]
    pub subject: String,

    /// Plain text body
    #[schema(example = "Welcome aboard")]
    pub text: String,

    /// HTML body
    #[schema(example = "<p>Welcome aboard</p>")]
    pub html: String,
}

impl TryFrom<SendEmailBody> for EmailMessage {
    type Error = MessageError;

    fn try_from(body: SendEmailBody) -> Result<Self, Self::Error> {
        EmailMessage::builder(body.from.name.as_deref(), &body.from.email)
            .to(body.to)
            .cc(body.cc)
            .bcc(body.bcc)
            .reply_to(body.reply_to)
            .subject(body.subject)
            .text(body.text)
            .html(body.html)
            .build()
    }
}

/// Send email response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    /// Always `sent`
    #[schema(example = "sent")]
    pub status: String,
}

/// Send an email through the first provider that accepts it
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Emails",
    path = "/api/v1/emails",
    request_body = SendEmailBody,
    responses(
        (status = StatusCode::ACCEPTED, description = "Email sent", body = SendEmailResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid message", body = ErrorResponse),
        (status = StatusCode::TOO_MANY_REQUESTS, description = "Providers are rate limiting", body = ErrorResponse),
        (status = StatusCode::BAD_GATEWAY, description = "Provider refused the credentials or the message", body = ErrorResponse),
        (status = StatusCode::SERVICE_UNAVAILABLE, description = "No provider reachable", body = ErrorResponse),
    )
)]
pub async fn handler<W: WaitlistService, R: EmailRelay>(
    State(state): State<AppState<W, R>>,
    request: Result<Json<SendEmailBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SendEmailResponse>), ApiError> {
    let Json(request) = request?;

    let message: EmailMessage = request.try_into()?;

    ApiError::ensure_sent(state.relay.relay(&message).await)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SendEmailResponse {
            status: "sent".to_string(),
        }),
    ))
}
