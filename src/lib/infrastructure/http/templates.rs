//! HTML templates

use askama::Template;
use chrono::{Datelike, Utc};

/// The marketing landing page
#[derive(Debug, Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    /// Year shown in the footer
    pub year: i32,
}

impl LandingTemplate {
    /// Creates a new `LandingTemplate` for the current year
    pub fn new() -> Self {
        Self {
            year: Utc::now().year(),
        }
    }
}

impl Default for LandingTemplate {
    fn default() -> Self {
        Self::new()
    }
}

/// Fragment swapped into the waitlist form's message slot
#[derive(Debug, Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    /// Green when true, red otherwise
    pub success: bool,

    /// The message
    pub text: String,
}

impl MessageTemplate {
    /// A green message
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    /// A red message
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}
