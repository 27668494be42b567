//! SendGrid
//!
//! All recipients go into a single personalization. Only the first reply-to
//! address is sent.

use serde::Serialize;
use serde_json::Value;

use crate::domain::communication::{email_addresses::EmailAddress, message::EmailMessage};

use super::{accepted, AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "sendgrid",
    endpoint: "https://api.sendgrid.com/v3/mail/send",
    auth: AuthScheme::Bearer,
    build_body,
    interpret_success: accepted,
};

#[derive(Debug, Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: SendGridAddress<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<SendGridAddress<'a>>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<SendGridAddress<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<SendGridAddress<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<SendGridAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct SendGridAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a EmailAddress> for SendGridAddress<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            email: address.as_str(),
            name: None,
        }
    }
}

// SendGrid requires text/plain to come before text/html.
#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

fn recipients(list: &[EmailAddress]) -> Vec<SendGridAddress<'_>> {
    list.iter().map(SendGridAddress::from).collect()
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(SendGridRequest {
        personalizations: vec![Personalization {
            to: recipients(message.to()),
            cc: recipients(message.cc()),
            bcc: recipients(message.bcc()),
        }],
        from: SendGridAddress {
            email: message.from().address().as_str(),
            name: message.from().name(),
        },
        reply_to: message.reply_to().first().map(SendGridAddress::from),
        subject: message.subject(),
        content: vec![
            Content {
                content_type: "text/plain",
                value: message.text(),
            },
            Content {
                content_type: "text/html",
                value: message.html(),
            },
        ],
    })
}
