//! Form Port (Driver Port)
//!
//! Access to the live form. The controller reads it fresh on every event
//! and only writes it back for presets and scheme filling.

use crate::domain::strategy_form::FormValues;

/// Port for the strategy form.
pub trait FormPort: Send + Sync {
    /// Current form contents.
    fn read_form(&self) -> FormValues;

    /// Replace the form contents.
    fn write_form(&self, form: FormValues);
}
