pub mod assignment;
pub mod survey;
pub mod user;

pub use assignment::Assignment;
pub use survey::{Answer, PitSurveyRecord, YesNo};
pub use user::User;
