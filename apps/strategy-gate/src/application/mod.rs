//! Application Layer
//!
//! The application layer orchestrates domain logic.
//! It defines:
//!
//! - **Ports**: Interfaces for the form, the strategy panel and the backtest service
//! - **Services**: The strategy form controller
//! - **DTOs**: Data transfer objects for the backtest API boundary

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
