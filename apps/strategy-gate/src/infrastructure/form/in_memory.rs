//! In-memory form.

use std::sync::{PoisonError, RwLock};

use crate::application::ports::FormPort;
use crate::domain::strategy_form::FormValues;

/// In-memory implementation of `FormPort`.
///
/// Holds one form for the lifetime of a request or test.
#[derive(Debug, Default)]
pub struct InMemoryForm {
    values: RwLock<FormValues>,
}

impl InMemoryForm {
    /// Create a form holding the given values.
    #[must_use]
    pub const fn new(values: FormValues) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Take the current values out of the form.
    #[must_use]
    pub fn into_values(self) -> FormValues {
        self.values
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormPort for InMemoryForm {
    fn read_form(&self) -> FormValues {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write_form(&self, form: FormValues) {
        *self.values.write().unwrap_or_else(PoisonError::into_inner) = form;
    }
}
