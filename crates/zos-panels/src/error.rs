//! Error types for panel wiring

use crate::port::ElementId;
use crate::PanelId;

/// Errors raised while wiring panels and controllers
///
/// Pointer handling itself never fails; these only come out of
/// construction, configuration and lookups by panel id.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// The geometry port does not know the element
    #[error("element {0} does not exist")]
    MissingElement(ElementId),

    /// An option value is out of range or contradicts another option
    #[error("invalid constraint `{field}`: {reason}")]
    InvalidConstraint {
        /// Option name as it appears in the configuration object
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A panel with this id is already registered
    #[error("panel `{0}` already exists")]
    DuplicatePanel(PanelId),

    /// No panel is registered under this id
    #[error("panel `{0}` does not exist")]
    UnknownPanel(PanelId),

    /// Configuration could not be decoded
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PanelError {
    /// Create an invalid constraint error.
    pub fn constraint(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject negative or non-finite values for an optional pixel option.
pub(crate) fn check_non_negative(field: &'static str, value: f32) -> Result<(), PanelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PanelError::constraint(field, format!("must be a finite value >= 0, got {value}")))
    }
}

/// Reject zero, negative or non-finite values.
pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<(), PanelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PanelError::constraint(field, format!("must be a finite value > 0, got {value}")))
    }
}
