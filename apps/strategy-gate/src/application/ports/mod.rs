//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): the form the user edits
//! - **Driven Ports** (Secondary/Outbound): the strategy panel and the backtest service

mod backtest_port;
mod form_port;
mod strategy_view_port;

pub use backtest_port::{BacktestError, BacktestPort};
pub use form_port::FormPort;
pub use strategy_view_port::StrategyViewPort;

#[cfg(test)]
pub use backtest_port::MockBacktestPort;
