//! Strategy panel adapters.

mod in_memory;

pub use in_memory::{InMemoryStrategyView, PanelState};
