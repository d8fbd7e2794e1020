//! Operations behind the HTTP routes. Each submodule adds one group of
//! methods to [`MedicineOps`].

pub mod calendar_view;
pub mod manage;
pub mod notifications;
pub mod taken;

use crate::db::sqlite::MedicineStorage;

#[derive(Clone)]
pub struct MedicineOps {
    storage: MedicineStorage,
}

impl MedicineOps {
    pub fn new(storage: MedicineStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &MedicineStorage {
        &self.storage
    }
}
