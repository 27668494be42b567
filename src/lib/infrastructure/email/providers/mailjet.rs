//! Mailjet (Send API v3.1)
//!
//! A 2xx carries a status per message; only the first one is read. Only the
//! first reply-to address is sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::communication::{
        delivery::SendOutcome, email_addresses::EmailAddress, message::EmailMessage,
    },
    infrastructure::outbound::HttpResponse,
};

use super::{AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "mailjet",
    endpoint: "https://api.mailjet.com/v3.1/send",
    auth: AuthScheme::Basic,
    build_body,
    interpret_success,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetRequest<'a> {
    messages: Vec<MailjetMessage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetMessage<'a> {
    from: MailjetContact<'a>,
    to: Vec<MailjetContact<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<MailjetContact<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<MailjetContact<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<MailjetContact<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetContact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a EmailAddress> for MailjetContact<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            email: address.as_str(),
            name: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetResponse {
    messages: Vec<MailjetMessageStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetMessageStatus {
    status: String,
    #[serde(default)]
    errors: Vec<MailjetError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetError {
    error_message: String,
}

fn contacts(list: &[EmailAddress]) -> Vec<MailjetContact<'_>> {
    list.iter().map(MailjetContact::from).collect()
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(MailjetRequest {
        messages: vec![MailjetMessage {
            from: MailjetContact {
                email: message.from().address().as_str(),
                name: message.from().name(),
            },
            to: contacts(message.to()),
            cc: contacts(message.cc()),
            bcc: contacts(message.bcc()),
            reply_to: message.reply_to().first().map(MailjetContact::from),
            subject: message.subject(),
            text_part: message.text(),
            html_part: message.html(),
        }],
    })
}

fn interpret_success(response: &HttpResponse) -> SendOutcome {
    let Some(body) = response.parse_json::<MailjetResponse>() else {
        return SendOutcome::Unreachable;
    };

    match body.messages.into_iter().next() {
        Some(first) if first.status == "success" => SendOutcome::Sent,
        Some(first) => SendOutcome::Rejected {
            detail: first
                .errors
                .into_iter()
                .next()
                .map(|err| err.error_message)
                .unwrap_or(first.status),
        },
        None => SendOutcome::Rejected {
            detail: "no message status in response".to_string(),
        },
    }
}
