use super::MedicineOps;
use crate::calendar::{self, MonthLayout};
use crate::error::MedcalError;
use crate::types::forms::{CalendarQuery, parse_date};
use crate::types::views::CalendarView;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use tracing::debug;

fn parse_or<T: FromStr>(value: Option<&str>, default: T) -> Result<T, MedcalError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| MedcalError::InvalidParameters),
        None => Ok(default),
    }
}

impl MedicineOps {
    /// Month view: grid, per-day due medicines with taken state, and the
    /// medicines active on the selected day.
    pub async fn month_view(
        &self,
        query: &CalendarQuery,
        today: NaiveDate,
    ) -> Result<CalendarView, MedcalError> {
        let year: i32 = parse_or(query.year.as_deref(), today.year())?;
        let month: u32 = parse_or(query.month.as_deref(), today.month())?;
        let selected_date = match query.selected_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => today,
        };

        let layout = MonthLayout::new(year, month)?;

        let medicines = self
            .storage
            .list_overlapping(layout.first_day, layout.last_day)
            .await?;
        let records = self
            .storage
            .taken_between(layout.first_day, layout.last_day)
            .await?;
        let taken = calendar::taken_map(&records);
        let calendar_data = calendar::day_entries(&layout, &medicines, &taken);

        let medicines_for_day = self.storage.list_active_on(selected_date).await?;

        debug!(
            year,
            month,
            medicines = medicines.len(),
            taken_records = records.len(),
            "built month view"
        );

        Ok(CalendarView {
            layout,
            calendar_data,
            today,
            selected_date,
            medicines_for_day,
        })
    }
}
