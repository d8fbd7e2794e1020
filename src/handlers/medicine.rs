use axum::{
    Form, Json,
    extract::{Query, State},
    response::Redirect,
};
use chrono::Datelike;

use crate::types::forms::{DATE_FORMAT, ManageContentQuery, MedicineForm, ToggleForm};
use crate::types::views::{ManageContent, ToggleResponse};
use crate::{MedcalError, router::MedcalState};

/// GET /medicine_manage_content -> prefill data for the register/edit panel.
pub async fn medicine_manage_content(
    State(state): State<MedcalState>,
    Query(query): Query<ManageContentQuery>,
) -> Result<Json<ManageContent>, MedcalError> {
    let content = state.ops.manage_content(&query).await?;
    Ok(Json(content))
}

/// POST /medicine_manage -> save or delete, then back to the month of `date`.
pub async fn manage_medicine(
    State(state): State<MedcalState>,
    Form(form): Form<MedicineForm>,
) -> Result<Redirect, MedcalError> {
    let date = state.ops.manage_medicine(&form).await?;
    let target = format!(
        "/?year={}&month={}&selected_date={}",
        date.year(),
        date.month(),
        date.format(DATE_FORMAT)
    );
    Ok(Redirect::to(&target))
}

/// POST /toggle_taken -> `{success, is_taken}`.
pub async fn toggle_taken(
    State(state): State<MedcalState>,
    Form(form): Form<ToggleForm>,
) -> Result<Json<ToggleResponse>, MedcalError> {
    let is_taken = state.ops.toggle_taken(&form).await?;
    Ok(Json(ToggleResponse {
        success: true,
        is_taken,
    }))
}
