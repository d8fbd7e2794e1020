pub mod calendar;
pub mod medicine;
pub mod notifications;
