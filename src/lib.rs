// Rise Up - personalised 14-day plans and daily progress tracking
// Library exports

pub mod clock;
pub mod config;
pub mod errors;
pub mod generation;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod providers;
pub mod questionnaire;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use errors::{GenerationError, ProgressError};
pub use generation::PlanGenerator;
pub use plan::Plan;
pub use profile::UserProfile;
pub use progress::ProgressEngine;
