//! Month grid and day aggregation. Pure functions over already-loaded rows;
//! all storage access lives in `service`.

use crate::db::models::{Medicine, TakenRecord};
use crate::error::MedcalError;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub type Week = [NaiveDate; 7];

/// `(medicine_id, date) -> is_taken` for a prefetched date range.
pub type TakenMap = HashMap<(i64, NaiveDate), bool>;

/// Layout of one calendar month: Monday-first weeks plus navigation targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub weeks: Vec<Week>,
    /// Last day of the previous month.
    pub prev_month_date: NaiveDate,
    /// Some day in the following month.
    pub next_month_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMedicine {
    pub id: i64,
    pub name: String,
    pub is_taken: bool,
}

impl MonthLayout {
    pub fn new(year: i32, month: u32) -> Result<Self, MedcalError> {
        let invalid = || MedcalError::InvalidMonth { year, month };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        // the 28th exists in every month, four days later is always next month
        let next_month_date = NaiveDate::from_ymd_opt(year, month, 28)
            .and_then(|d| d.checked_add_days(Days::new(4)))
            .ok_or_else(invalid)?;
        let last_day = next_month_date
            .with_day(1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;
        let prev_month_date = first_day.pred_opt().ok_or_else(invalid)?;

        let weeks = weeks_covering(first_day, last_day).ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
            weeks,
            prev_month_date,
            next_month_date,
        })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.first_day <= day && day <= self.last_day
    }

    /// Iterates grid days that belong to this month, in order.
    pub fn days_in_month(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks
            .iter()
            .flatten()
            .copied()
            .filter(|d| self.contains(*d))
    }
}

fn weeks_covering(first: NaiveDate, last: NaiveDate) -> Option<Vec<Week>> {
    let lead = first.weekday().num_days_from_monday() as u64;
    let mut cursor = first.checked_sub_days(Days::new(lead))?;
    let mut weeks = Vec::with_capacity(6);
    while cursor <= last {
        let mut week = [cursor; 7];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = cursor.checked_add_days(Days::new(offset as u64))?;
        }
        cursor = cursor.checked_add_days(Days::new(7))?;
        weeks.push(week);
    }
    Some(weeks)
}

/// Later records win when a pair is duplicated.
pub fn taken_map(records: &[TakenRecord]) -> TakenMap {
    records
        .iter()
        .map(|r| ((r.medicine_id, r.record_date), r.is_taken))
        .collect()
}

/// Medicines due on each day of the month, annotated with taken state.
pub fn day_entries(
    layout: &MonthLayout,
    medicines: &[Medicine],
    taken: &TakenMap,
) -> BTreeMap<NaiveDate, Vec<DayMedicine>> {
    layout
        .days_in_month()
        .map(|day| {
            let due = medicines
                .iter()
                .filter(|m| m.is_active_on(day))
                .map(|m| DayMedicine {
                    id: m.id,
                    name: m.name.clone(),
                    is_taken: taken.get(&(m.id, day)).copied().unwrap_or(false),
                })
                .collect();
            (day, due)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn medicine(id: i64, name: &str, start: &str, end: &str) -> Medicine {
        Medicine {
            id,
            name: name.to_string(),
            start_date: date(start),
            end_date: date(end),
            take_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            dosage: "1 tablet".to_string(),
            notes: None,
        }
    }

    #[test]
    fn january_2024_grid() {
        let layout = MonthLayout::new(2024, 1).unwrap();
        // 2024-01-01 is a Monday
        assert_eq!(layout.weeks.len(), 5);
        assert_eq!(layout.weeks[0][0], date("2024-01-01"));
        assert_eq!(layout.weeks[4][6], date("2024-02-04"));
        assert_eq!(layout.last_day, date("2024-01-31"));
        assert_eq!(layout.prev_month_date, date("2023-12-31"));
        assert_eq!(layout.next_month_date, date("2024-02-01"));
        assert_eq!(layout.days_in_month().count(), 31);
    }

    #[test]
    fn grid_weeks_start_monday_and_cover_month() {
        for month in 1..=12 {
            let layout = MonthLayout::new(2025, month).unwrap();
            assert!(layout.weeks.len() >= 4 && layout.weeks.len() <= 6);
            for week in &layout.weeks {
                assert_eq!(week[0].weekday(), Weekday::Mon);
                for pair in week.windows(2) {
                    assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
                }
            }
            let flat: Vec<_> = layout.weeks.iter().flatten().copied().collect();
            assert!(flat.contains(&layout.first_day));
            assert!(flat.contains(&layout.last_day));
        }
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let dec = MonthLayout::new(2023, 12).unwrap();
        assert_eq!(dec.next_month_date, date("2024-01-01"));
        assert_eq!(dec.prev_month_date, date("2023-11-30"));

        let feb = MonthLayout::new(2024, 2).unwrap();
        assert_eq!(feb.last_day, date("2024-02-29"));
        assert_eq!(feb.next_month_date, date("2024-03-03"));
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(matches!(
            MonthLayout::new(2024, 13),
            Err(MedcalError::InvalidMonth { year: 2024, month: 13 })
        ));
        assert!(MonthLayout::new(2024, 0).is_err());
    }

    #[test]
    fn aspirin_shows_on_first_ten_days_only() {
        let layout = MonthLayout::new(2024, 1).unwrap();
        let meds = vec![medicine(1, "Aspirin", "2024-01-01", "2024-01-10")];
        let entries = day_entries(&layout, &meds, &TakenMap::new());

        assert_eq!(entries.len(), 31);
        for (day, due) in &entries {
            if day.day() <= 10 {
                assert_eq!(due.len(), 1, "{day}");
                assert_eq!(due[0].name, "Aspirin");
                assert!(!due[0].is_taken);
            } else {
                assert!(due.is_empty(), "{day}");
            }
        }
        assert!(!entries.contains_key(&date("2024-02-01")));
    }

    #[test]
    fn taken_state_is_looked_up_per_day() {
        let layout = MonthLayout::new(2024, 1).unwrap();
        let meds = vec![
            medicine(1, "Aspirin", "2023-12-20", "2024-01-03"),
            medicine(2, "Vitamin D", "2024-01-02", "2024-03-01"),
        ];
        let records = vec![
            TakenRecord {
                id: 1,
                medicine_id: 2,
                record_date: date("2024-01-02"),
                is_taken: false,
            },
            TakenRecord {
                id: 2,
                medicine_id: 2,
                record_date: date("2024-01-02"),
                is_taken: true,
            },
        ];
        let entries = day_entries(&layout, &meds, &taken_map(&records));

        let jan2 = &entries[&date("2024-01-02")];
        assert_eq!(jan2.len(), 2);
        assert!(!jan2[0].is_taken);
        assert!(jan2[1].is_taken);
        assert_eq!(entries[&date("2024-01-04")].len(), 1);
        assert!(!entries[&date("2024-01-04")][0].is_taken);
    }
}
