use crate::calendar::{DayMedicine, MonthLayout};
use crate::db::models::{Medicine, hhmm};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Data behind the month view (`GET /`).
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    #[serde(flatten)]
    pub layout: MonthLayout,
    pub calendar_data: BTreeMap<NaiveDate, Vec<DayMedicine>>,
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    pub medicines_for_day: Vec<Medicine>,
}

/// Data behind the register/edit panel (`GET /medicine_manage_content`).
#[derive(Debug, Clone, Serialize)]
pub struct ManageContent {
    pub record_date: NaiveDate,
    pub medicine: Option<Medicine>,
    pub medicines_for_day: Vec<Medicine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub is_taken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub name: String,
    #[serde(with = "hhmm")]
    pub take_time: NaiveTime,
    pub dosage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationResponse {
    pub notifications: Vec<Notification>,
    pub play_sound: bool,
}

impl From<Vec<Notification>> for NotificationResponse {
    fn from(notifications: Vec<Notification>) -> Self {
        let play_sound = !notifications.is_empty();
        Self {
            notifications,
            play_sound,
        }
    }
}
