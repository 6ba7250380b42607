//! Validation report accumulation.
//!
//! This module provides [`ValidationReport`], the mutable accumulator shared
//! by an entire validator tree so that every violation surfaces together
//! rather than only the first.

use std::fmt::{self, Display};

/// The accumulated outcome of one validation run.
///
/// A report collects human-readable violation messages in insertion order.
/// Success is derived: a run succeeded iff no message was ever added.
/// Messages are never removed or deduplicated.
///
/// # Example
///
/// ```rust
/// use inquest::ValidationReport;
///
/// let mut report = ValidationReport::new();
/// assert!(report.is_success());
///
/// report.add_message("/age: -3 is not a multiple of 4");
/// assert!(!report.is_success());
/// assert_eq!(report.messages().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    messages: Vec<String>,
}

impl ValidationReport {
    /// Creates an empty (successful) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one violation message.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Returns true iff no message was ever added.
    pub fn is_success(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the recorded messages in insertion order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the report, returning its messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "validation succeeded");
        }
        writeln!(f, "validation failed with {} error(s):", self.messages.len())?;
        for (i, message) in self.messages.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_success() {
        let report = ValidationReport::new();
        assert!(report.is_success());
        assert!(report.messages().is_empty());
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut report = ValidationReport::new();
        report.add_message("first");
        report.add_message("second");
        report.add_message("first");

        assert!(!report.is_success());
        assert_eq!(report.messages(), &["first", "second", "first"]);
    }

    #[test]
    fn test_into_messages() {
        let mut report = ValidationReport::new();
        report.add_message("only");
        assert_eq!(report.into_messages(), vec!["only".to_string()]);
    }

    #[test]
    fn test_display_success() {
        let report = ValidationReport::new();
        assert_eq!(report.to_string(), "validation succeeded");
    }

    #[test]
    fn test_display_failure_lists_messages() {
        let mut report = ValidationReport::new();
        report.add_message("/name: missing required property");
        report.add_message("(root): 10 is not a multiple of 3");

        let display = report.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. /name: missing required property"));
        assert!(display.contains("2. (root): 10 is not a multiple of 3"));
    }
}
