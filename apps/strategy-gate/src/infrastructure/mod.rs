//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `backtest_api/`: HTTP client for the backtest service
//!   - `view/`: In-memory strategy panel
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!   - `form/`: In-memory form state

pub mod backtest_api;
pub mod form;
pub mod http;
pub mod view;
