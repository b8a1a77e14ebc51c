pub mod applications;
pub mod profile;
