pub mod calc;
pub mod constants;
pub mod form;
pub mod nav;
pub mod numeric;
pub mod report;

use thiserror::Error;

/// Validation failures surfaced to the user as a blocking alert.
///
/// The `Display` text of each variant is the alert message.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LabError {
    #[error("Please enter a valid number of test cases (1-10).")]
    InvalidCount { input: String },

    #[error("Please fill in all input fields before calculating.")]
    MissingInput { case: usize, position: usize },

    #[error("'{value}' is not a valid number ({label}).")]
    InvalidNumber {
        case: usize,
        position: usize,
        label: String,
        value: String,
    },
}

impl LabError {
    /// Short title for the alert popup.
    pub fn title(&self) -> &'static str {
        match self {
            LabError::InvalidCount { .. } => "Invalid count",
            LabError::MissingInput { .. } => "Missing input",
            LabError::InvalidNumber { .. } => "Invalid number",
        }
    }
}
