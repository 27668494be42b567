//! Brevo
//!
//! Brevo takes a single reply-to contact: only the first reply-to address is
//! sent.

use serde::Serialize;
use serde_json::Value;

use crate::domain::communication::{email_addresses::EmailAddress, message::EmailMessage};

use super::{accepted, AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "brevo",
    endpoint: "https://api.brevo.com/v3/smtp/email",
    auth: AuthScheme::Header("api-key"),
    build_body,
    interpret_success: accepted,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoRequest<'a> {
    sender: BrevoContact<'a>,
    to: Vec<BrevoContact<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<BrevoContact<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<BrevoContact<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<BrevoContact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

#[derive(Debug, Serialize)]
struct BrevoContact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

impl<'a> From<&'a EmailAddress> for BrevoContact<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            name: None,
            email: address.as_str(),
        }
    }
}

fn contacts(list: &[EmailAddress]) -> Vec<BrevoContact<'_>> {
    list.iter().map(BrevoContact::from).collect()
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(BrevoRequest {
        sender: BrevoContact {
            name: message.from().name(),
            email: message.from().address().as_str(),
        },
        to: contacts(message.to()),
        cc: contacts(message.cc()),
        bcc: contacts(message.bcc()),
        reply_to: message.reply_to().first().map(BrevoContact::from),
        subject: message.subject(),
        html_content: message.html(),
        text_content: message.text(),
    })
}
