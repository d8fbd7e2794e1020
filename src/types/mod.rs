//! Request inputs (query strings, form bodies) and JSON response payloads.

pub mod forms;
pub mod views;
