use super::MedicineOps;
use crate::db::models::NewMedicine;
use crate::error::MedcalError;
use crate::types::forms::{
    ManageAction, ManageContentQuery, MedicineForm, parse_date, parse_id, parse_time,
};
use crate::types::views::ManageContent;
use chrono::NaiveDate;
use tracing::{debug, info};

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, MedcalError> {
    value.as_deref().ok_or(MedcalError::MissingField(field))
}

impl NewMedicine {
    /// Build row values from a submitted form, parsing dates and the take time.
    pub fn from_form(form: &MedicineForm) -> Result<Self, MedcalError> {
        Ok(Self {
            name: required(&form.name, "name")?.to_string(),
            start_date: parse_date(required(&form.start_date, "start_date")?)?,
            end_date: parse_date(required(&form.end_date, "end_date")?)?,
            take_time: parse_time(required(&form.take_time, "take_time")?)?,
            dosage: required(&form.dosage, "dosage")?.to_string(),
            notes: form.notes.clone(),
        })
    }
}

impl MedicineOps {
    /// Prefill data for the register/edit panel of one day.
    pub async fn manage_content(
        &self,
        query: &ManageContentQuery,
    ) -> Result<ManageContent, MedcalError> {
        let record_date = parse_date(required(&query.date_str, "date_str")?)?;
        let medicine = match parse_id(query.medicine_id.as_deref()) {
            Some(id) => self.storage.get_medicine(id).await?,
            None => None,
        };
        let medicines_for_day = self.storage.list_active_on(record_date).await?;

        Ok(ManageContent {
            record_date,
            medicine,
            medicines_for_day,
        })
    }

    /// Apply a save/delete form. Returns the form's `date`, which the caller
    /// redirects back to. Unknown ids and unknown actions are no-ops.
    pub async fn manage_medicine(&self, form: &MedicineForm) -> Result<NaiveDate, MedcalError> {
        let record_date = parse_date(required(&form.date, "date")?)?;
        let medicine_id = form.medicine_id();

        match form.action() {
            ManageAction::Save => {
                let values = NewMedicine::from_form(form)?;
                match medicine_id {
                    Some(id) => {
                        if self.storage.update_medicine(id, &values).await? {
                            info!(medicine_id = id, name = %values.name, "medicine updated");
                        } else {
                            debug!(medicine_id = id, "edit of unknown medicine ignored");
                        }
                    }
                    None => {
                        let id = self.storage.insert_medicine(&values).await?;
                        info!(medicine_id = id, name = %values.name, "medicine created");
                    }
                }
            }
            ManageAction::Delete => {
                let deleted = match medicine_id {
                    Some(id) => self.storage.delete_medicine(id).await?,
                    None => false,
                };
                if deleted {
                    info!(?medicine_id, "medicine deleted");
                } else {
                    debug!(?medicine_id, "delete of unknown medicine ignored");
                }
            }
            ManageAction::Other => {
                debug!(action = ?form.action, "unrecognized manage action ignored");
            }
        }

        Ok(record_date)
    }
}
