//! MailerSend
//!
//! Only the first reply-to address is sent.

use serde::Serialize;
use serde_json::Value;

use crate::domain::communication::{email_addresses::EmailAddress, message::EmailMessage};

use super::{accepted, AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "mailersend",
    endpoint: "https://api.mailersend.com/v1/email",
    auth: AuthScheme::Bearer,
    build_body,
    interpret_success: accepted,
};

#[derive(Debug, Serialize)]
struct MailerSendRequest<'a> {
    from: Recipient<'a>,
    to: Vec<Recipient<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<Recipient<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<Recipient<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Recipient<'a>>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a EmailAddress> for Recipient<'a> {
    fn from(address: &'a EmailAddress) -> Self {
        Self {
            email: address.as_str(),
            name: None,
        }
    }
}

fn recipients(list: &[EmailAddress]) -> Vec<Recipient<'_>> {
    list.iter().map(Recipient::from).collect()
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(MailerSendRequest {
        from: Recipient {
            email: message.from().address().as_str(),
            name: message.from().name(),
        },
        to: recipients(message.to()),
        cc: recipients(message.cc()),
        bcc: recipients(message.bcc()),
        reply_to: message.reply_to().first().map(Recipient::from),
        subject: message.subject(),
        text: message.text(),
        html: message.html(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::communication::message::tests::{full_message, sample_message};

    use super::*;

    #[test]
    fn test_body() -> TestResult {
        assert_eq!(
            build_body(&sample_message())?,
            json!({
                "from": { "email": "a@x.com", "name": "A" },
                "to": [{ "email": "b@x.com" }],
                "subject": "S",
                "text": "T",
                "html": "<p>T</p>"
            })
        );

        Ok(())
    }

    #[test]
    fn test_body_with_copies_and_first_reply_to() -> TestResult {
        let body = build_body(&full_message())?;

        assert_eq!(body["cc"], json!([{ "email": "d@x.com" }]));
        assert_eq!(body["bcc"], json!([{ "email": "e@x.com" }]));
        assert_eq!(body["reply_to"], json!({ "email": "r1@x.com" }));

        Ok(())
    }
}
