use axum::{
    Router,
    routing::{get, post},
};

use crate::db::sqlite::MedicineStorage;
use crate::handlers::{calendar, medicine, notifications};
use crate::service::MedicineOps;

#[derive(Clone)]
pub struct MedcalState {
    pub ops: MedicineOps,
}

impl MedcalState {
    pub fn new(storage: MedicineStorage) -> Self {
        Self {
            ops: MedicineOps::new(storage),
        }
    }
}

pub fn medcal_router(state: MedcalState) -> Router {
    Router::new()
        .route("/", get(calendar::show_calendar))
        .route(
            "/medicine_manage_content",
            get(medicine::medicine_manage_content),
        )
        .route("/medicine_manage", post(medicine::manage_medicine))
        .route("/toggle_taken", post(medicine::toggle_taken))
        .route(
            "/check_notifications",
            get(notifications::check_notifications),
        )
        .with_state(state)
}
