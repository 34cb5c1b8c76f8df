//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the strategy form controller over REST. Each
//! request carries the whole form; the controller runs against an
//! in-memory form and panel built for that request.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
