//! Action — the instruction delivered to the owner's device when an
//! automation fires.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A remote method invocation the receiving client performs on a device.
///
/// `parameters` holds the argument *types* and `arguments` the argument
/// *values*; both are positional and must have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Target device on the client side.
    pub device: String,
    /// Method to invoke on the device.
    pub method: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub parameters: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub arguments: Vec<String>,
}

impl Action {
    /// Create an action without arguments.
    #[must_use]
    pub fn new(device: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            method: method.into(),
            parameters: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Append one positional argument with its type.
    #[must_use]
    pub fn argument(mut self, parameter: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self.arguments.push(value.into());
        self
    }

    /// Check action invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `device` or `method` is empty, or
    /// when parameter types and argument values differ in count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.device.is_empty() {
            return Err(ValidationError::EmptyDevice);
        }
        if self.method.is_empty() {
            return Err(ValidationError::EmptyMethod);
        }
        if self.parameters.len() != self.arguments.len() {
            return Err(ValidationError::ArgumentCountMismatch {
                parameters: self.parameters.len(),
                arguments: self.arguments.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}({})", self.device, self.method, self.arguments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_action_with_arguments() {
        let a = Action::new("light", "setBrightness").argument("int", "80");
        assert_eq!(a.to_string(), "light.setBrightness(80)");
    }

    #[test]
    fn should_serialize_with_client_field_names() {
        let a = Action::new("wifi", "setEnabled").argument("boolean", "false");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "device": "wifi",
                "method": "setEnabled",
                "parameters": ["boolean"],
                "arguments": ["false"]
            })
        );
    }

    #[test]
    fn should_default_missing_argument_lists_when_deserializing() {
        let json = serde_json::json!({"device": "ringer", "method": "silence"});
        let a: Action = serde_json::from_value(json).unwrap();
        assert!(a.parameters.is_empty());
        assert!(a.arguments.is_empty());
    }

    #[test]
    fn should_accept_valid_action() {
        let a = Action::new("light", "on").argument("string", "hall");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_device() {
        assert_eq!(
            Action::new("", "on").validate(),
            Err(ValidationError::EmptyDevice)
        );
    }

    #[test]
    fn should_reject_empty_method() {
        assert_eq!(
            Action::new("light", "").validate(),
            Err(ValidationError::EmptyMethod)
        );
    }

    #[test]
    fn should_reject_mismatched_argument_counts() {
        let mut a = Action::new("light", "on");
        a.parameters.push("int".to_string());
        assert_eq!(
            a.validate(),
            Err(ValidationError::ArgumentCountMismatch {
                parameters: 1,
                arguments: 0
            })
        );
    }
}
