//! Uptime handler

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{communication::delivery::EmailRelay, waitlist::WaitlistService},
    infrastructure::http::state::AppState,
};

/// The uptime response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UptimeResponse {
    /// The uptime of the application in seconds
    #[schema(example = 123)]
    pub uptime: i64,
}

/// Get the uptime of the application
#[utoipa::path(
    get,
    operation_id = "uptime",
    tag = "System",
    path = "/api/v1/uptime",
    responses(
        (status = StatusCode::OK, description = "Uptime response", body = UptimeResponse),
    )
)]
pub async fn handler<W: WaitlistService, R: EmailRelay>(
    State(state): State<AppState<W, R>>,
) -> Json<UptimeResponse> {
    let uptime = Utc::now().timestamp() - state.start_time.timestamp();

    Json(UptimeResponse { uptime })
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use chrono::Utc;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::tests::mock_state};

    use super::UptimeResponse;

    #[tokio::test]
    async fn test_uptime_handler() -> TestResult {
        let state = mock_state();
        let start_time = state.start_time;

        let response = TestServer::new(router(state))?.get("/api/v1/uptime").await;

        response.assert_status_ok();

        let json = response.json::<UptimeResponse>();

        assert!(
            json.uptime <= Utc::now().timestamp() - start_time.timestamp(),
            "App uptime should not exceed the time since start"
        );
        assert!(json.uptime >= 0);

        Ok(())
    }
}
