//! Postmark
//!
//! Recipient lists are comma-separated strings. Only the first reply-to
//! address is sent. A 2xx body still carries an error code that must be
//! zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::communication::{
        delivery::SendOutcome, email_addresses::EmailAddress, message::EmailMessage,
    },
    infrastructure::outbound::HttpResponse,
};

use super::{addresses, AuthScheme, ProviderTable};

pub(super) static TABLE: ProviderTable = ProviderTable {
    name: "postmark",
    endpoint: "https://api.postmarkapp.com/email",
    auth: AuthScheme::Header("X-Postmark-Server-Token"),
    build_body,
    interpret_success,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkRequest<'a> {
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text_body: &'a str,
    html_body: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkResponse {
    error_code: i64,
    #[serde(default)]
    message: String,
}

fn joined(list: &[EmailAddress]) -> Option<String> {
    if list.is_empty() {
        None
    } else {
        Some(addresses(list).join(", "))
    }
}

fn build_body(message: &EmailMessage) -> serde_json::Result<Value> {
    serde_json::to_value(PostmarkRequest {
        from: message.from().to_string(),
        to: addresses(message.to()).join(", "),
        cc: joined(message.cc()),
        bcc: joined(message.bcc()),
        reply_to: message.reply_to().first().map(EmailAddress::as_str),
        subject: message.subject(),
        text_body: message.text(),
        html_body: message.html(),
    })
}

fn interpret_success(response: &HttpResponse) -> SendOutcome {
    match response.parse_json::<PostmarkResponse>() {
        Some(body) if body.error_code == 0 => SendOutcome::Sent,
        Some(body) => SendOutcome::Rejected {
            detail: format!("{}: {}", body.error_code, body.message),
        },
        None => SendOutcome::Unreachable,
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
                "From": "A <a@x.com>",
                "To": "b@x.com",
                "Subject": "S",
                "TextBody": "T",
                "HtmlBody": "<p>T</p>"
            })
        );

        Ok(())
    }

    #[test]
    fn test_body_with_copies_and_first_reply_to() -> TestResult {
        let body = build_body(&full_message())?;

        assert_eq!(body["To"], json!("b@x.com, c@x.com"));
        assert_eq!(body["Cc"], json!("d@x.com"));
        assert_eq!(body["Bcc"], json!("e@x.com"));
        assert_eq!(body["ReplyTo"], json!("r1@x.com"));

        Ok(())
    }

    #[test]
    fn test_zero_error_code_is_sent() {
        let response = HttpResponse::new(
            StatusCode::OK,
            json!({
                "To": "b@x.com",
                "MessageID": "b7bc2f4a-e38e-4336-af7d-e6c392c2f817",
                "ErrorCode": 0,
                "Message": "OK"
            })
            .to_string(),
        );

        assert_eq!(interpret_success(&response), SendOutcome::Sent);
    }

    #[test]
    fn test_non_zero_error_code_is_rejected() {
        let response = HttpResponse::new(
            StatusCode::OK,
            json!({ "ErrorCode": 406, "Message": "Inactive recipient" }).to_string(),
        );

        assert_eq!(
            interpret_success(&response),
            SendOutcome::Rejected {
                detail: "406: Inactive recipient".to_string()
            }
        );
    }

    #[test]
    fn test_undecodable_body_is_unreachable() {
        let response = HttpResponse::new(StatusCode::OK, "");

        assert_eq!(interpret_success(&response), SendOutcome::Unreachable);
    }
}
