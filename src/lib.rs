pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;
pub mod types;

pub use db::models::{Medicine, TakenRecord};
pub use error::MedcalError;
