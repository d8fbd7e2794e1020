use super::MedicineOps;
use crate::error::MedcalError;
use crate::types::forms::{ToggleForm, parse_date, parse_id};
use tracing::info;

impl MedicineOps {
    /// Flip the taken flag of `(medicine_id, date)`; a first toggle marks it taken.
    pub async fn toggle_taken(&self, form: &ToggleForm) -> Result<bool, MedcalError> {
        let medicine_id =
            parse_id(form.medicine_id.as_deref()).ok_or(MedcalError::InvalidParameters)?;
        let date = form
            .date
            .as_deref()
            .ok_or(MedcalError::InvalidParameters)?;
        let record_date = parse_date(date)?;

        let is_taken = self.storage.toggle_taken(medicine_id, record_date).await?;
        info!(medicine_id, %record_date, is_taken, "taken state toggled");
        Ok(is_taken)
    }
}
