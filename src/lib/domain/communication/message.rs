//! Normalized email message

use crate::domain::communication::{
    email_addresses::{EmailAddress, Mailbox},
    errors::MessageError,
};

/// A provider-independent outbound email.
///
/// Always has at least one recipient and only valid addresses. It cannot be
/// modified once built; adapters only read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    from: Mailbox,
    to: Vec<EmailAddress>,
    cc: Vec<EmailAddress>,
    bcc: Vec<EmailAddress>,
    reply_to: Vec<EmailAddress>,
    subject: String,
    text: String,
    html: String,
}

impl EmailMessage {
    /// Starts building a message sent from `from_email`.
    pub fn builder(from_name: Option<&str>, from_email: &str) -> EmailMessageBuilder {
        EmailMessageBuilder {
            from_name: from_name.map(str::to_string),
            from_email: from_email.to_string(),
            ..Default::default()
        }
    }

    /// The sender
    pub fn from(&self) -> &Mailbox {
        &self.from
    }

    /// The recipients, never empty
    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    /// Carbon-copy recipients
    pub fn cc(&self) -> &[EmailAddress] {
        &self.cc
    }

    /// Blind carbon-copy recipients
    pub fn bcc(&self) -> &[EmailAddress] {
        &self.bcc
    }

    /// Reply-to addresses
    pub fn reply_to(&self) -> &[EmailAddress] {
        &self.reply_to
    }

    /// The subject line
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The plain text body
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The HTML body
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Collects raw message fields and validates them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct EmailMessageBuilder {
    from_name: Option<String>,
    from_email: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    reply_to: Vec<String>,
    subject: String,
    text: String,
    html: String,
}

impl EmailMessageBuilder {
    /// Adds recipients
    pub fn to<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Adds carbon-copy recipients
    pub fn cc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc.extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Adds blind carbon-copy recipients
    pub fn bcc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc.extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Adds reply-to addresses
    pub fn reply_to<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reply_to.extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Sets the subject
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the plain text body
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the HTML body
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Validates every address and builds the message.
    pub fn build(self) -> Result<EmailMessage, MessageError> {
        let from = Mailbox::new(
            self.from_name.as_deref(),
            parse_address("from", &self.from_email)?,
        );

        let to = parse_addresses("to", &self.to)?;

        if to.is_empty() {
            return Err(MessageError::NoRecipients);
        }

        Ok(EmailMessage {
            from,
            to,
            cc: parse_addresses("cc", &self.cc)?,
            bcc: parse_addresses("bcc", &self.bcc)?,
            reply_to: parse_addresses("replyTo", &self.reply_to)?,
            subject: self.subject,
            text: self.text,
            html: self.html,
        })
    }
}

fn parse_address(field: &'static str, raw: &str) -> Result<EmailAddress, MessageError> {
    EmailAddress::new(raw).map_err(|_| MessageError::InvalidAddress {
        field,
        address: raw.to_string(),
    })
}

fn parse_addresses(field: &'static str, raw: &[String]) -> Result<Vec<EmailAddress>, MessageError> {
    raw.iter().map(|address| parse_address(field, address)).collect()
}
