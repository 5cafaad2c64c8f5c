pub mod evaluation;
pub mod session;

pub use evaluation::{SubmissionAggregator, aggregate};
pub use session::{Roster, SessionRegistry};
