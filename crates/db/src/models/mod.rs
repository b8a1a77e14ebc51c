pub mod profile;
pub mod submission;
