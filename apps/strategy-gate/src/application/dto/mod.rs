//! Data Transfer Objects
//!
//! DTOs crossing the boundary to the backtest service.

mod backtest_request;

pub use backtest_request::BacktestRequest;
