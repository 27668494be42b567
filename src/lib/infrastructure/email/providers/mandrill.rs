//! Mandrill (Mailchimp Transactional)
//!
//! The API key travels in the body as `key`. Copies are folded into `to`
//! with a recipient type, and the first reply-to address becomes a
//! `Reply-To` header. A 2xx body lists one status per recipient; only the
//! first is read.

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
    name: "mandrill",
    endpoint: "https://mandrillapp.com/api/1.0/messages/send",
    auth: AuthScheme::BodyField("key"),
    build_body,
    interpret_success,
};

const ACCEPTED_STATUSES: [&str; 3] = ["sent", "queued", "scheduled"];

#[derive(Debug, Serialize)]
struct MandrillRequest<'a> {
    message: MandrillMessage<'a>,
}

#[derive(Debug, Serialize)]
struct MandrillMessage<'a> {
    from_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_name: Option<&'a str>,
    to: Vec<MandrillRecipient<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<MandrillHeaders<'a>>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Serialize)]
struct MandrillRecipient<'a> {
    email: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct MandrillHeaders<'a> {
    #[serde(rename = "Reply-To")]
    reply_to: &'a str,
}

#[derive(Debug, Deserialize)]
struct MandrillRecipientStatus {
    status: String,
    #[serde(default)]
    reject_reason: Option<String>,
}

fn recipients<'a>(
    list: &'a [EmailAddress],
    kind: &'static str,
) -> impl Iterator<Item = MandrillRecipient<'a>> {
    list.iter().map(move |address| MandrillRecipient {
        email: address.as_str(),
        kind,
    })
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(MandrillRequest {
        message: MandrillMessage {
            from_email: message.from().address().as_str(),
            from_name: message.from().name(),
            to: recipients(message.to(), "to")
                .chain(recipients(message.cc(), "cc"))
                .chain(recipients(message.bcc(), "bcc"))
                .collect(),
            headers: message
                .reply_to()
                .first()
                .map(|address| MandrillHeaders {
                    reply_to: address.as_str(),
                }),
            subject: message.subject(),
            text: message.text(),
            html: message.html(),
        },
    })
}

fn interpret_success(response: &HttpResponse) -> SendOutcome {
    let Some(statuses) = response.parse_json::<Vec<MandrillRecipientStatus>>() else {
        return SendOutcome::Unreachable;
    };

    match statuses.into_iter().next() {
        Some(first) if ACCEPTED_STATUSES.contains(&first.status.as_str()) => SendOutcome::Sent,
        Some(first) => SendOutcome::Rejected {
            detail: first.reject_reason.unwrap_or(first.status),
        },
        None => SendOutcome::Rejected {
            detail: "no recipient status in response".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::communication::message::tests::{full_message, sample_message};

    use super::*;

    #[test]
    fn test_body() -> TestResult {
        assert_eq!(
            build_body(&sample_message())?,
            json!({
                "message": {
                    "from_email": "a@x.com",
                    "from_name": "A",
                    "to": [{ "email": "b@x.com", "type": "to" }],
                    "subject": "S",
                    "text": "T",
                    "html": "<p>T</p>"
                }
            })
        );

        Ok(())
    }

    #[test]
    fn test_body_folds_copies_and_keeps_first_reply_to() -> TestResult {
        let body = build_body(&full_message())?;

        assert_eq!(
            body["message"]["to"],
            json!([
                { "email": "b@x.com", "type": "to" },
                { "email": "c@x.com", "type": "to" },
                { "email": "d@x.com", "type": "cc" },
                { "email": "e@x.com", "type": "bcc" }
            ])
        );
        assert_eq!(
            body["message"]["headers"],
            json!({ "Reply-To": "r1@x.com" })
        );

        Ok(())
    }

    #[test]
    fn test_first_recipient_queued_is_sent() {
        let response = HttpResponse::new(
            StatusCode::OK,
            json!([
                { "email": "b@x.com", "status": "queued", "_id": "abc" },
                { "email": "c@x.com", "status": "rejected", "reject_reason": "hard-bounce" }
            ])
            .to_string(),
        );

        assert_eq!(interpret_success(&response), SendOutcome::Sent);
    }

    #[test]
    fn test_first_recipient_rejected_is_rejected() {
        let response = HttpResponse::new(
            StatusCode::OK,
            json!([
                { "email": "b@x.com", "status": "rejected", "reject_reason": "unsub" },
                { "email": "c@x.com", "status": "sent" }
            ])
            .to_string(),
        );

        assert_eq!(
            interpret_success(&response),
            SendOutcome::Rejected {
                detail: "unsub".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_without_reason_reports_status() {
        let response = HttpResponse::new(
            StatusCode::OK,
            json!([{ "email": "b@x.com", "status": "invalid", "reject_reason": null }])
                .to_string(),
        );

        assert_eq!(
            interpret_success(&response),
            SendOutcome::Rejected {
                detail: "invalid".to_string()
            }
        );
    }

    #[test]
    fn test_undecodable_body_is_unreachable() {
        let response = HttpResponse::new(StatusCode::OK, r#"{"status":"error"}"#);

        assert_eq!(interpret_success(&response), SendOutcome::Unreachable);
    }
}
