use super::MedicineOps;
use crate::db::models::Medicine;
use crate::error::MedcalError;
use crate::types::views::{Notification, NotificationResponse};
use chrono::{NaiveDateTime, TimeDelta};

/// How close to `take_time` a medicine triggers an alert, either side.
pub const NOTIFICATION_WINDOW_SECS: i64 = 300;

/// Medicines active on `now`'s date whose take time is within the window.
/// Both times are compared on the same date, so there is no wrap at midnight.
pub fn due_notifications(medicines: &[Medicine], now: NaiveDateTime) -> Vec<Notification> {
    let today = now.date();
    medicines
        .iter()
        .filter(|m| m.is_active_on(today))
        .filter(|m| {
            let diff = today.and_time(m.take_time) - now;
            diff.abs() <= TimeDelta::seconds(NOTIFICATION_WINDOW_SECS)
        })
        .map(|m| Notification {
            name: m.name.clone(),
            take_time: m.take_time,
            dosage: m.dosage.clone(),
        })
        .collect()
}

impl MedicineOps {
    pub async fn check_notifications(
        &self,
        now: NaiveDateTime,
    ) -> Result<NotificationResponse, MedcalError> {
        let medicines = self.storage.list_active_on(now.date()).await?;
        Ok(due_notifications(&medicines, now).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn aspirin() -> Medicine {
        Medicine {
            id: 1,
            name: "Aspirin".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            take_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            dosage: "100mg".to_string(),
            notes: None,
        }
    }

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn within_five_minutes_notifies() {
        let due = due_notifications(&[aspirin()], at(5, 8, 2, 0));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Aspirin");
        assert_eq!(due[0].dosage, "100mg");

        let resp: NotificationResponse = due.into();
        assert!(resp.play_sound);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["notifications"][0]["take_time"], "08:00");
    }

    #[test]
    fn window_is_inclusive_on_both_sides() {
        assert_eq!(due_notifications(&[aspirin()], at(5, 8, 5, 0)).len(), 1);
        assert_eq!(due_notifications(&[aspirin()], at(5, 7, 55, 0)).len(), 1);
        assert!(due_notifications(&[aspirin()], at(5, 8, 5, 1)).is_empty());

        let just_past = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_micro_opt(8, 5, 0, 500)
            .unwrap();
        assert!(due_notifications(&[aspirin()], just_past).is_empty());
    }

    #[test]
    fn outside_window_is_silent() {
        let resp: NotificationResponse = due_notifications(&[aspirin()], at(5, 8, 10, 0)).into();
        assert!(resp.notifications.is_empty());
        assert!(!resp.play_sound);
    }

    #[test]
    fn inactive_days_never_notify() {
        assert!(due_notifications(&[aspirin()], at(11, 8, 0, 0)).is_empty());
    }
}
