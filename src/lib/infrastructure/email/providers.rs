//! Provider adapters.
//!
//! Every provider is one [`ProviderTable`] row: where to POST, where the
//! credential goes, how the normalized message maps onto the provider's JSON,
//! and how a 2xx response is read. [`ProviderAdapter`] runs any row through
//! an [`HttpClient`]. Adding a provider means adding a row.

use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{HeaderMap, RETRY_AFTER},
    StatusCode,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    domain::communication::{
        credentials::Credential,
        delivery::{EmailProvider, SendOutcome},
        email_addresses::EmailAddress,
        errors::CredentialError,
        message::EmailMessage,
    },
    infrastructure::outbound::{HttpClient, HttpRequest, HttpResponse},
};

mod brevo;
mod mailersend;
mod mailjet;
mod mandrill;
mod postmark;
mod resend;
mod sendgrid;

/// Longest provider response body kept in a rejection detail
const MAX_DETAIL_CHARS: usize = 256;

/// Where a provider expects its credential
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`, takes [`Credential::Bearer`]
    Bearer,

    /// A custom header holding the key, takes [`Credential::ApiKey`]
    Header(&'static str),

    /// HTTP Basic auth, takes [`Credential::Basic`]
    Basic,

    /// A top-level JSON body field holding the key, takes [`Credential::ApiKey`]
    BodyField(&'static str),
}

impl AuthScheme {
    /// Wraps a raw secret in the credential variant this scheme takes.
    pub fn credential(&self, raw: &str) -> Result<Credential, CredentialError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(CredentialError::Empty);
        }

        match self {
            Self::Bearer => Ok(Credential::Bearer(raw.to_string())),
            Self::Header(_) | Self::BodyField(_) => Ok(Credential::ApiKey(raw.to_string())),
            Self::Basic => Credential::basic_from_pair(raw),
        }
    }

    /// Attaches the body and the credential to `request`.
    ///
    /// A credential of the wrong shape is [`SendOutcome::InvalidCredential`].
    fn apply(
        &self,
        request: HttpRequest,
        mut body: Value,
        credential: &Credential,
    ) -> Result<HttpRequest, SendOutcome> {
        match (self, credential) {
            (Self::Bearer, Credential::Bearer(token)) => Ok(request
                .header("authorization", format!("Bearer {token}"))
                .json(body)),
            (Self::Header(name), Credential::ApiKey(key)) => {
                Ok(request.header(*name, key.as_str()).json(body))
            }
            (Self::Basic, Credential::Basic { username, password }) => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));

                Ok(request
                    .header("authorization", format!("Basic {encoded}"))
                    .json(body))
            }
            (Self::BodyField(field), Credential::ApiKey(key)) => match body.as_object_mut() {
                Some(object) => {
                    object.insert(field.to_string(), Value::String(key.clone()));
                    Ok(request.json(body))
                }
                None => Err(SendOutcome::Unreachable),
            },
            _ => Err(SendOutcome::InvalidCredential),
        }
    }
}

/// One provider's mapping
#[derive(Debug)]
pub struct ProviderTable {
    /// Lowercase provider name, also used in configuration
    pub name: &'static str,

    /// The send endpoint
    pub endpoint: &'static str,

    /// Where the credential goes
    pub auth: AuthScheme,

    /// Maps the normalized message onto the provider's request body
    pub build_body: fn(&EmailMessage) -> serde_json::Result<Value>,

    /// Reads a 2xx response
    pub interpret_success: fn(&HttpResponse) -> SendOutcome,
}

impl ProviderTable {
    /// Builds the outbound request for `message`.
    pub fn request(
        &self,
        message: &EmailMessage,
        credential: &Credential,
    ) -> Result<HttpRequest, SendOutcome> {
        let body = (self.build_body)(message).map_err(|err| {
            warn!(provider = self.name, error = %err, "could not encode request body");
            SendOutcome::Unreachable
        })?;

        self.auth
            .apply(HttpRequest::post(self.endpoint), body, credential)
    }

    /// Turns the provider's response, or the lack of one, into an outcome.
    pub fn interpret(&self, response: Option<HttpResponse>) -> SendOutcome {
        let Some(response) = response else {
            return SendOutcome::Unreachable;
        };

        match response.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SendOutcome::InvalidCredential,
            StatusCode::TOO_MANY_REQUESTS => SendOutcome::RateLimited {
                retry_after: retry_after(&response.headers),
            },
            status if status.is_success() => (self.interpret_success)(&response),
            _ => SendOutcome::Rejected {
                detail: rejection_detail(&response),
            },
        }
    }
}

/// The providers we can send through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Resend
    Resend,
    /// Brevo, formerly Sendinblue
    Brevo,
    /// Twilio SendGrid
    SendGrid,
    /// Mailjet
    Mailjet,
    /// Postmark
    Postmark,
    /// MailerSend
    MailerSend,
    /// Mandrill (Mailchimp Transactional)
    Mandrill,
}

impl Provider {
    /// Every provider
    pub const ALL: [Provider; 7] = [
        Provider::Resend,
        Provider::Brevo,
        Provider::SendGrid,
        Provider::Mailjet,
        Provider::Postmark,
        Provider::MailerSend,
        Provider::Mandrill,
    ];

    /// The provider's mapping
    pub fn table(self) -> &'static ProviderTable {
        match self {
            Provider::Resend => &resend::TABLE,
            Provider::Brevo => &brevo::TABLE,
            Provider::SendGrid => &sendgrid::TABLE,
            Provider::Mailjet => &mailjet::TABLE,
            Provider::Postmark => &postmark::TABLE,
            Provider::MailerSend => &mailersend::TABLE,
            Provider::Mandrill => &mandrill::TABLE,
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        self.table().name
    }

    /// Wraps a raw secret in the credential variant this provider takes.
    ///
    /// Mailjet takes a pre-joined `public_key:private_key` pair.
    pub fn credential(self, raw: &str) -> Result<Credential, CredentialError> {
        self.table().auth.credential(raw)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The provider name is not one we know
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown email provider \"{0}\"")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        Provider::ALL
            .into_iter()
            .find(|provider| provider.name() == name)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// [`EmailProvider`] for any [`Provider`], sending through `H`
#[derive(Debug, Clone)]
pub struct ProviderAdapter<H>
where
    H: HttpClient,
{
    provider: Provider,
    http: H,
}

impl<H> ProviderAdapter<H>
where
    H: HttpClient,
{
    /// Create an adapter for `provider`
    pub fn new(provider: Provider, http: H) -> Self {
        Self { provider, http }
    }
}

#[async_trait]
impl<H> EmailProvider for ProviderAdapter<H>
where
    H: HttpClient,
{
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    async fn send(&self, message: &EmailMessage, credential: &Credential) -> SendOutcome {
        let table = self.provider.table();

        let request = match table.request(message, credential) {
            Ok(request) => request,
            Err(outcome) => {
                warn!(
                    provider = table.name,
                    credential = credential.kind(),
                    outcome = outcome.label(),
                    "could not build provider request"
                );
                return outcome;
            }
        };

        debug!(
            provider = table.name,
            to_count = message.to().len(),
            cc_count = message.cc().len(),
            bcc_count = message.bcc().len(),
            reply_to_count = message.reply_to().len(),
            "sending email"
        );

        let outcome = table.interpret(self.http.call(request).await);

        debug!(provider = table.name, outcome = outcome.label(), "provider responded");

        outcome
    }
}

/// 2xx means accepted, for providers without per-message status
fn accepted(_response: &HttpResponse) -> SendOutcome {
    SendOutcome::Sent
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn rejection_detail(response: &HttpResponse) -> String {
    let body = response.body.trim();

    if body.is_empty() {
        return response.status.to_string();
    }

    let body: String = body.chars().take(MAX_DETAIL_CHARS).collect();

    format!("{}: {}", response.status.as_u16(), body)
}

fn addresses(list: &[EmailAddress]) -> Vec<&str> {
    list.iter().map(EmailAddress::as_str).collect()
}

#[cfg(test)]
mod tests {
    use reqwest::{header::HeaderValue, Method};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::communication::message::tests::sample_message,
        infrastructure::outbound::tests::MockHttpClient,
    };

    use super::*;

    fn valid_credential(provider: Provider) -> Credential {
        match provider.table().auth {
            AuthScheme::Basic => provider.credential("public:private"),
            _ => provider.credential("secret"),
        }
        .expect("valid credential")
    }

    fn responding(response: Option<HttpResponse>) -> MockHttpClient {
        let mut http = MockHttpClient::new();

        http.expect_call()
            .times(1)
            .returning(move |_| response.clone());

        http
    }

    #[test]
    fn test_parse_provider_names() -> TestResult {
        for provider in Provider::ALL {
            assert_eq!(provider.name().parse::<Provider>()?, provider);
        }

        assert_eq!(" SendGrid ".parse::<Provider>()?, Provider::SendGrid);
        assert_eq!(
            "mailgun".parse::<Provider>(),
            Err(UnknownProvider("mailgun".to_string()))
        );

        Ok(())
    }

    #[test]
    fn test_endpoints() {
        let endpoints: Vec<_> = Provider::ALL
            .iter()
            .map(|provider| provider.table().endpoint)
            .collect();

        assert_eq!(
            endpoints,
            vec![
                "https://api.resend.com/emails",
                "https://api.brevo.com/v3/smtp/email",
                "https://api.sendgrid.com/v3/mail/send",
                "https://api.mailjet.com/v3.1/send",
                "https://api.postmarkapp.com/email",
                "https://api.mailersend.com/v1/email",
                "https://mandrillapp.com/api/1.0/messages/send",
            ]
        );
    }

    #[test]
    fn test_credential_variants() -> TestResult {
        assert_eq!(
            Provider::Resend.credential("re_123")?,
            Credential::Bearer("re_123".to_string())
        );
        assert_eq!(
            Provider::Brevo.credential("xkeysib")?,
            Credential::ApiKey("xkeysib".to_string())
        );
        assert_eq!(
            Provider::Mandrill.credential("md")?,
            Credential::ApiKey("md".to_string())
        );
        assert_eq!(
            Provider::Mailjet.credential("public:private")?,
            Credential::Basic {
                username: "public".to_string(),
                password: "private".to_string(),
            }
        );
        assert_eq!(
            Provider::Mailjet.credential("public"),
            Err(CredentialError::MissingSeparator)
        );

        Ok(())
    }

    #[test]
    fn test_empty_credential_is_rejected() {
        for provider in Provider::ALL {
            assert_eq!(provider.credential("  "), Err(CredentialError::Empty));
        }
    }

    #[test]
    fn test_bearer_placement() -> TestResult {
        let request = Provider::Resend
            .table()
            .request(&sample_message(), &Credential::Bearer("re_123".to_string()))
            .map_err(|outcome| outcome.label())?;

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://api.resend.com/emails");
        assert_eq!(request.header_value("authorization"), Some("Bearer re_123"));

        Ok(())
    }

    #[test]
    fn test_header_placement() -> TestResult {
        let credential = Credential::ApiKey("server-token".to_string());

        let brevo = Provider::Brevo
            .table()
            .request(&sample_message(), &credential)
            .map_err(|outcome| outcome.label())?;
        let postmark = Provider::Postmark
            .table()
            .request(&sample_message(), &credential)
            .map_err(|outcome| outcome.label())?;

        assert_eq!(brevo.header_value("api-key"), Some("server-token"));
        assert_eq!(brevo.header_value("authorization"), None);
        assert_eq!(
            postmark.header_value("X-Postmark-Server-Token"),
            Some("server-token")
        );

        Ok(())
    }

    #[test]
    fn test_basic_placement() -> TestResult {
        let request = Provider::Mailjet
            .table()
            .request(&sample_message(), &Credential::basic_from_pair("user:pass")?)
            .map_err(|outcome| outcome.label())?;

        // base64("user:pass")
        assert_eq!(
            request.header_value("authorization"),
            Some("Basic dXNlcjpwYXNz")
        );

        Ok(())
    }

    #[test]
    fn test_body_field_placement() -> TestResult {
        let request = Provider::Mandrill
            .table()
            .request(&sample_message(), &Credential::ApiKey("md-key".to_string()))
            .map_err(|outcome| outcome.label())?;

        let body = request.body.ok_or("missing body")?;

        assert_eq!(body["key"], json!("md-key"));
        assert!(request.headers.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_mismatched_credential_makes_no_call() {
        let mismatches = [
            (Provider::Resend, Credential::ApiKey("key".to_string())),
            (Provider::Brevo, Credential::Bearer("token".to_string())),
            (Provider::Mailjet, Credential::Bearer("token".to_string())),
            (
                Provider::Mandrill,
                Credential::Basic {
                    username: "u".to_string(),
                    password: "p".to_string(),
                },
            ),
        ];

        for (provider, credential) in mismatches {
            let mut http = MockHttpClient::new();
            http.expect_call().times(0);

            let adapter = ProviderAdapter::new(provider, http);

            assert_eq!(
                adapter.send(&sample_message(), &credential).await,
                SendOutcome::InvalidCredential,
                "{provider}"
            );
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_unreachable_for_every_provider() {
        for provider in Provider::ALL {
            let adapter = ProviderAdapter::new(provider, responding(None));

            let outcome = adapter
                .send(&sample_message(), &valid_credential(provider))
                .await;

            assert_eq!(outcome, SendOutcome::Unreachable, "{provider}");
        }
    }

    #[tokio::test]
    async fn test_unauthorized_is_invalid_credential_for_every_provider() {
        for provider in Provider::ALL {
            for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
                let response = HttpResponse::new(status, r#"{"message":"bad key"}"#);
                let adapter = ProviderAdapter::new(provider, responding(Some(response)));

                let outcome = adapter
                    .send(&sample_message(), &valid_credential(provider))
                    .await;

                assert_eq!(outcome, SendOutcome::InvalidCredential, "{provider}");
            }
        }
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limited_for_every_provider() {
        for provider in Provider::ALL {
            let mut response = HttpResponse::new(StatusCode::TOO_MANY_REQUESTS, "");
            response
                .headers
                .insert(RETRY_AFTER, HeaderValue::from_static("30"));

            let adapter = ProviderAdapter::new(provider, responding(Some(response)));

            let outcome = adapter
                .send(&sample_message(), &valid_credential(provider))
                .await;

            assert_eq!(
                outcome,
                SendOutcome::RateLimited {
                    retry_after: Some(Duration::from_secs(30))
                },
                "{provider}"
            );
        }
    }

    #[tokio::test]
    async fn test_too_many_requests_without_retry_after() {
        let response = HttpResponse::new(StatusCode::TOO_MANY_REQUESTS, "slow down");
        let adapter = ProviderAdapter::new(Provider::Brevo, responding(Some(response)));

        let outcome = adapter
            .send(&sample_message(), &Credential::ApiKey("key".to_string()))
            .await;

        assert_eq!(outcome, SendOutcome::RateLimited { retry_after: None });
    }

    #[tokio::test]
    async fn test_other_errors_are_rejected_for_every_provider() {
        for provider in Provider::ALL {
            let response = HttpResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                r#"{"message":"invalid from"}"#,
            );
            let adapter = ProviderAdapter::new(provider, responding(Some(response)));

            let outcome = adapter
                .send(&sample_message(), &valid_credential(provider))
                .await;

            assert_eq!(
                outcome,
                SendOutcome::Rejected {
                    detail: r#"422: {"message":"invalid from"}"#.to_string()
                },
                "{provider}"
            );
        }
    }

    #[tokio::test]
    async fn test_adapter_posts_mapped_body() -> TestResult {
        let mut http = MockHttpClient::new();

        http.expect_call()
            .withf(|request| {
                request.url == "https://api.mailersend.com/v1/email"
                    && request.header_value("authorization") == Some("Bearer ms_token")
                    && request.body.as_ref().map(|body| body["subject"].clone())
                        == Some(json!("S"))
            })
            .times(1)
            .returning(|_| Some(HttpResponse::new(StatusCode::ACCEPTED, "")));

        let adapter = ProviderAdapter::new(Provider::MailerSend, http);

        let outcome = adapter
            .send(&sample_message(), &Provider::MailerSend.credential("ms_token")?)
            .await;

        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(adapter.name(), "mailersend");

        Ok(())
    }

    #[test]
    fn test_rejection_detail_is_truncated() {
        let response = HttpResponse::new(StatusCode::BAD_REQUEST, "x".repeat(1000));

        let detail = rejection_detail(&response);

        assert_eq!(detail.len(), "400: ".len() + MAX_DETAIL_CHARS);
    }

    #[test]
    fn test_rejection_detail_without_body() {
        let response = HttpResponse::new(StatusCode::BAD_GATEWAY, "  ");

        assert_eq!(rejection_detail(&response), "502 Bad Gateway");
    }
}
