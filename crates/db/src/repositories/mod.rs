pub mod profile_repo;
pub mod submission_repo;

pub use profile_repo::ProfileRepo;
pub use submission_repo::SubmissionRepo;
