//! Landing page handler

use crate::infrastructure::http::templates::LandingTemplate;

/// Render the landing page
pub async fn handler() -> LandingTemplate {
    LandingTemplate::new()
}
