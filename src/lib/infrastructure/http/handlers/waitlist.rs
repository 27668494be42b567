//! Waitlist form handler

use axum::{
    extract::{rejection::FormRejection, State},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::{
        communication::delivery::EmailRelay,
        waitlist::{errors::WaitlistError, WaitlistService, WaitlistSignup},
    },
    infrastructure::http::{state::AppState, templates::MessageTemplate},
};

const SUBSCRIBED: &str = "Successfully subscribed! Your great way begins.";

/// The waitlist form
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WaitlistForm {
    /// Optional display name
    pub name: Option<String>,

    /// Email address
    pub email: Option<String>,
}

/// Join the waitlist.
///
/// Always answers 200 with a message fragment for htmx to swap in. A body
/// that is not form-encoded counts as a form without an email.
pub async fn handler<W: WaitlistService, R: EmailRelay>(
    State(state): State<AppState<W, R>>,
    form: Result<Form<WaitlistForm>, FormRejection>,
) -> MessageTemplate {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable waitlist form");
            return MessageTemplate::failure(WaitlistError::EmailMissing.to_string());
        }
    };

    let signup = match WaitlistSignup::new(form.name.as_deref(), form.email.as_deref()) {
        Ok(signup) => signup,
        Err(err) => {
            debug!(error = %err, "rejected waitlist form");
            return MessageTemplate::failure(err.to_string());
        }
    };

    match state.waitlist.join(&signup).await {
        Ok(()) => MessageTemplate::success(SUBSCRIBED),
        Err(err) => MessageTemplate::failure(err.to_string()),
    }
}
