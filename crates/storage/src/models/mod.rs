pub mod competition;
pub mod profile;
pub mod registration;
pub mod status;
pub mod submission;

pub use competition::Competition;
pub use profile::Profile;
pub use registration::Registration;
pub use status::{CompetitionStatus, RegistrationStatus, ReviewStatus, Role};
pub use submission::Submission;
