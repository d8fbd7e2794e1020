use crate::error::MedcalError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// HTML forms submit untouched inputs as empty strings; treat those as absent.
pub fn empty_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, MedcalError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        MedcalError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, MedcalError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|source| {
        MedcalError::InvalidTime {
            value: value.to_string(),
            source,
        }
    })
}

/// Lenient id parse: zero and anything unparsable count as absent.
pub fn parse_id(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| i64::from_str(v.trim()).ok())
        .filter(|id| *id != 0)
}

/// Query of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub selected_date: Option<String>,
}

/// Query of `GET /medicine_manage_content`.
#[derive(Debug, Default, Deserialize)]
pub struct ManageContentQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_str: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub medicine_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    Save,
    Delete,
    Other,
}

impl From<Option<&str>> for ManageAction {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some("save") => ManageAction::Save,
            Some("delete") => ManageAction::Delete,
            _ => ManageAction::Other,
        }
    }
}

/// Body of `POST /medicine_manage`.
#[derive(Debug, Default, Deserialize)]
pub struct MedicineForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub medicine_id: Option<String>,
    /// Empty is a valid value; only an absent field is missing.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub take_time: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
}

impl MedicineForm {
    pub fn action(&self) -> ManageAction {
        ManageAction::from(self.action.as_deref())
    }

    pub fn medicine_id(&self) -> Option<i64> {
        parse_id(self.medicine_id.as_deref())
    }
}

/// Body of `POST /toggle_taken`.
#[derive(Debug, Default, Deserialize)]
pub struct ToggleForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub medicine_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<String>,
}
