//! SQL DDL for initializing the medicine storage.

/// SQLite schema with:
/// - `medicines`: dates as `YYYY-MM-DD` text, `take_time` as `HH:MM:SS` text
/// - `taken_records`: `medicine_id` is not a foreign key, and there is no
///   uniqueness on `(medicine_id, record_date)`; callers look up before insert
/// - `is_taken` BOOLEAN (stored as INTEGER 0/1)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL, -- up to 255 chars
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    take_time TEXT NOT NULL,
    dosage TEXT NOT NULL, -- up to 50 chars
    notes TEXT NULL -- up to 500 chars
);

CREATE TABLE IF NOT EXISTS taken_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    medicine_id INTEGER NOT NULL,
    record_date TEXT NOT NULL,
    is_taken INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_taken_records_record_date ON taken_records(record_date);
"#;
