use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;

use crate::types::forms::CalendarQuery;
use crate::types::views::CalendarView;
use crate::{MedcalError, router::MedcalState};

/// GET / -> month view data for `year`/`month`, with `selected_date` details.
pub async fn show_calendar(
    State(state): State<MedcalState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, MedcalError> {
    let today = Local::now().date_naive();
    let view = state.ops.month_view(&query, today).await?;
    Ok(Json(view))
}
