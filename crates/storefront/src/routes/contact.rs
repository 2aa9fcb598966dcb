//! Contact route handlers.

use axum::{Json, extract::State};
use isha_core::OrderLink;
use tracing::instrument;

use crate::state::AppState;

/// General WhatsApp enquiry link for the floating chat button.
///
/// GET /api/contact
#[instrument(skip(state))]
pub async fn whatsapp(State(state): State<AppState>) -> Json<OrderLink> {
    Json(state.handoff().general_order())
}
