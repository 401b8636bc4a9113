pub mod competition;
pub mod profile;
pub mod registration;
pub mod submission;

pub use competition::CompetitionRepository;
pub use profile::ProfileRepository;
pub use registration::RegistrationRepository;
pub use submission::SubmissionRepository;
