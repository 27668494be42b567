//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Grids"),
    paths(emails::handler, uptime::handler),
    components(schemas(
        emails::SenderBody,
        emails::SendEmailBody,
        emails::SendEmailResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
