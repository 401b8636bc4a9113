pub mod common;
pub mod competition;
pub mod dashboard;
pub mod profile;
pub mod registration;
pub mod submission;
