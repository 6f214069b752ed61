use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::models::TestEmailResponse;
use crate::state::AppState;

pub fn diagnostic_routes() -> Router<AppState> {
    Router::new().route("/test-email", get(send_test_email))
}

/// GET /api/test-email - Send a fixed message to the operator mailbox
async fn send_test_email(State(state): State<AppState>) -> Result<Json<TestEmailResponse>> {
    let sent = state.mailer.send_test().await.map_err(|e| {
        tracing::error!(error = %e, "Test email failed");
        AppError::MailDetailed(e)
    })?;

    tracing::info!(message_id = %sent.message_id, "Test email sent");

    Ok(Json(TestEmailResponse {
        success: true,
        message_id: sent.message_id,
    }))
}
