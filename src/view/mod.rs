//! View-models behind the staff pages.
//!
//! Each view owns its local state, loads what it needs through a [ClassApi], and on a user
//! action computes the next full document and sends it. A failed call sets an error message
//! and leaves the previous state in place; nothing is retried.
//!
//! [ClassApi]: crate::client::ClassApi

use std::fmt::Display;

pub mod action;
pub mod add_activity;
pub mod add_class;
pub mod add_student;
pub mod details;
pub mod edit_class;
pub mod gate;
pub mod list_class;
pub mod search;

pub use action::{ActionError, ClassAction};

/// Transient feedback shown by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStatus {
    pub loading: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ViewStatus {
    pub fn start(&mut self) {
        self.loading = true;
        self.message = None;
        self.error = None;
    }

    pub fn succeed(&mut self, message: impl ToString) {
        self.loading = false;
        self.message = Some(message.to_string());
        self.error = None;
    }

    pub fn done(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl ToString, cause: impl Display) {
        tracing::warn!("{}: {}", message.to_string(), cause);
        self.loading = false;
        self.message = None;
        self.error = Some(message.to_string());
    }

    /// Input rejected before any request was sent.
    pub fn reject(&mut self, message: impl ToString) {
        self.message = Some(message.to_string());
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_replaces_an_earlier_failure() {
        let mut status = ViewStatus::default();
        status.fail("Failed to add class", "500: Internal Server Error");
        assert_eq!(status.error.as_deref(), Some("Failed to add class"));

        status.reject("Name and description are required.");
        assert_eq!(status.message.as_deref(), Some("Name and description are required."));
        assert!(status.error.is_none());
    }
}
