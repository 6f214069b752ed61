use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::mail::MailError;
use crate::models::{ContactResponse, InquiryRequest};
use crate::state::AppState;

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_inquiry))
}

/// POST /api/contact - Validate, notify the operator, then confirm to the submitter.
///
/// The confirmation is only attempted once the operator notification has been
/// accepted. Either failure fails the whole request.
async fn submit_inquiry(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InquiryRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected contact body");
        AppError::from(rejection)
    })?;

    let inquiry = request.validate().inspect_err(|_| {
        tracing::debug!("Contact submission missing required fields");
    })?;

    let admin = state.form.render_admin(&inquiry);
    let sent = state
        .mailer
        .notify_operator(admin)
        .await
        .map_err(|e| {
            tracing::error!(stage = "admin", error = %e, "Email error, nothing was sent");
            delivery_error(&state, e)
        })?;
    tracing::info!(stage = "admin", message_id = %sent.message_id, "Inquiry relayed");

    let confirmation = state.form.render_confirmation(&inquiry);
    let sent = state
        .mailer
        .confirm_submitter(&inquiry.email, confirmation)
        .await
        .map_err(|e| {
            tracing::error!(
                stage = "confirmation",
                error = %e,
                "Email error, operator was notified but the confirmation failed"
            );
            delivery_error(&state, e)
        })?;
    tracing::info!(stage = "confirmation", message_id = %sent.message_id, "Inquiry relayed");

    Ok(Json(ContactResponse::sent()))
}

fn delivery_error(state: &AppState, err: MailError) -> AppError {
    if state.config.expose_error_details {
        AppError::MailDetailed(err)
    } else {
        AppError::Mail(err)
    }
}
