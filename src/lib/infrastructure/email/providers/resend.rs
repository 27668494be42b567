//! Resend
//!
//! Takes every field of the normalized message, reply-to list included.

use serde::Serialize;
use serde_json::Value;

use crate::domain::communication::message::EmailMessage;

use super::{accepted, addresses, AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "resend",
    endpoint: "https://api.resend.com/emails",
    auth: AuthScheme::Bearer,
    build_body,
    interpret_success: accepted,
};

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reply_to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(ResendRequest {
        from: message.from().to_string(),
        to: addresses(message.to()),
        cc: addresses(message.cc()),
        bcc: addresses(message.bcc()),
        reply_to: addresses(message.reply_to()),
        subject: message.subject(),
        text: message.text(),
        html: message.html(),
    })
}
