//! Request intake surface
//!
//! Validates raw submission forms before they reach the board.

use crate::error::IntakeError;
use crate::types::{NewRequest, Priority};
use serde::{Deserialize, Serialize};

/// Raw submission form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub sample_type: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl IntakeForm {
    /// Create a form with medium priority
    pub fn new(
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        sample_type: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            phone: phone.into(),
            address: address.into(),
            sample_type: sample_type.into(),
            priority: None,
        }
    }

    /// With explicit priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Trim every field and reject blank required ones
    ///
    /// # Errors
    /// - `IntakeError::MissingField` naming the first blank field
    pub fn validate(self) -> Result<NewRequest, IntakeError> {
        Ok(NewRequest {
            customer_name: required("customerName", self.customer_name)?,
            phone: required("phone", self.phone)?,
            address: required("address", self.address)?,
            sample_type: required("sampleType", self.sample_type)?,
            priority: self.priority.unwrap_or_default(),
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingField(field));
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}
