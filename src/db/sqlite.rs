use crate::db::models::{Medicine, NewMedicine, TakenRecord};
use crate::db::schema::SQLITE_INIT;
use crate::error::MedcalError;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const MEDICINE_COLUMNS: &str = "id, name, start_date, end_date, take_time, dosage, notes";

#[derive(Clone)]
pub struct MedicineStorage {
    pool: SqlitePool,
}

impl MedicineStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if missing) and initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self, MedcalError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), MedcalError> {
        // sqlx::query runs a single statement
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a medicine. Returns the new row id.
    pub async fn insert_medicine(&self, med: &NewMedicine) -> Result<i64, MedcalError> {
        let res = sqlx::query(
            r#"
            INSERT INTO medicines (name, start_date, end_date, take_time, dosage, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&med.name)
        .bind(med.start_date)
        .bind(med.end_date)
        .bind(med.take_time)
        .bind(&med.dosage)
        .bind(&med.notes)
        .execute(&self.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    /// Overwrite all fields of an existing medicine. Returns false when no row has `id`.
    pub async fn update_medicine(&self, id: i64, med: &NewMedicine) -> Result<bool, MedcalError> {
        let res = sqlx::query(
            r#"UPDATE medicines SET
                name = ?,
                start_date = ?,
                end_date = ?,
                take_time = ?,
                dosage = ?,
                notes = ?
              WHERE id = ?"#,
        )
        .bind(&med.name)
        .bind(med.start_date)
        .bind(med.end_date)
        .bind(med.take_time)
        .bind(&med.dosage)
        .bind(&med.notes)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Delete by id. Taken records referencing it are left in place.
    pub async fn delete_medicine(&self, id: i64) -> Result<bool, MedcalError> {
        let res = sqlx::query("DELETE FROM medicines WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn get_medicine(&self, id: i64) -> Result<Option<Medicine>, MedcalError> {
        let med = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(med)
    }

    /// Medicines whose validity range overlaps `[from, to]`, ordered by id.
    pub async fn list_overlapping(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Medicine>, MedcalError> {
        let rows = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines
             WHERE start_date <= ? AND end_date >= ? ORDER BY id"
        ))
        .bind(to)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_active_on(&self, day: NaiveDate) -> Result<Vec<Medicine>, MedcalError> {
        self.list_overlapping(day, day).await
    }

    /// Taken records dated within `[from, to]`, ordered by id.
    pub async fn taken_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TakenRecord>, MedcalError> {
        let rows = sqlx::query_as::<_, TakenRecord>(
            r#"SELECT id, medicine_id, record_date, is_taken
               FROM taken_records WHERE record_date >= ? AND record_date <= ? ORDER BY id"#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// First record (lowest id) for the pair, if any.
    pub async fn find_taken(
        &self,
        medicine_id: i64,
        record_date: NaiveDate,
    ) -> Result<Option<TakenRecord>, MedcalError> {
        first_taken(&self.pool, medicine_id, record_date).await
    }

    /// Flip the taken flag for the pair, inserting `is_taken = true` when no
    /// record exists. Returns the resulting state.
    ///
    /// Runs under `BEGIN IMMEDIATE`: concurrent togglers queue on the busy
    /// timeout, the pair lookup and the write see the same snapshot.
    pub async fn toggle_taken(
        &self,
        medicine_id: i64,
        record_date: NaiveDate,
    ) -> Result<bool, MedcalError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let is_taken = match first_taken(&mut *tx, medicine_id, record_date).await? {
            Some(rec) => {
                let flipped = !rec.is_taken;
                sqlx::query("UPDATE taken_records SET is_taken = ? WHERE id = ?")
                    .bind(flipped)
                    .bind(rec.id)
                    .execute(&mut *tx)
                    .await?;
                debug!(record_id = rec.id, is_taken = flipped, "flipped taken record");
                flipped
            }
            None => {
                let res = sqlx::query(
                    "INSERT INTO taken_records (medicine_id, record_date, is_taken) VALUES (?, ?, ?)",
                )
                .bind(medicine_id)
                .bind(record_date)
                .bind(true)
                .execute(&mut *tx)
                .await?;
                debug!(record_id = res.last_insert_rowid(), "inserted taken record");
                true
            }
        };

        tx.commit().await?;
        Ok(is_taken)
    }
}

async fn first_taken<'e, E>(
    executor: E,
    medicine_id: i64,
    record_date: NaiveDate,
) -> Result<Option<TakenRecord>, MedcalError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rec = sqlx::query_as::<_, TakenRecord>(
        r#"SELECT id, medicine_id, record_date, is_taken
           FROM taken_records WHERE medicine_id = ? AND record_date = ?
           ORDER BY id LIMIT 1"#,
    )
    .bind(medicine_id)
    .bind(record_date)
    .fetch_optional(executor)
    .await?;
    Ok(rec)
}
