//! Strategy Form Bounded Context
//!
//! Everything the client decides about the delta inputs before a backtest
//! request may be sent:
//!
//! - Value objects: raw form state, parsed snapshot, verdict, violations
//! - Services: classification, leg validation, submission gate
//!
//! All of it is pure and synchronous.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
