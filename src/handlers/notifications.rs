use axum::{Json, extract::State};
use chrono::Local;

use crate::types::views::NotificationResponse;
use crate::{MedcalError, router::MedcalState};

/// GET /check_notifications -> medicines due around the current local time.
pub async fn check_notifications(
    State(state): State<MedcalState>,
) -> Result<Json<NotificationResponse>, MedcalError> {
    let now = Local::now().naive_local();
    let resp = state.ops.check_notifications(now).await?;
    Ok(Json(resp))
}
