//! Strategy form domain services.

mod classifier;
mod leg_validator;
mod submission_gate;

pub use classifier::{WHEEL_CALL_SELL_DELTA, WHEEL_PUT_SELL_DELTA, classify};
pub use leg_validator::{StrategyCheck, checks_for, evaluate, in_range, validate};
pub use submission_gate::{
    ApprovedSubmission, DATE_FORMAT, RejectionKind, SubmissionRejection, check_submission,
};
