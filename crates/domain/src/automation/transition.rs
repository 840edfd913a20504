//! Transition — the edge produced when an automation's satisfaction flips.

use serde::{Deserialize, Serialize};

/// Direction of an automation's state change in one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Satisfaction did not change.
    None,
    /// Conditions just became satisfied.
    Enter,
    /// Conditions just stopped being satisfied after an enter.
    Leave,
}

impl Transition {
    /// Whether this transition is an edge that should be dispatched.
    #[must_use]
    pub fn is_edge(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Enter => f.write_str("enter"),
            Self::Leave => f.write_str("leave"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_enter_and_leave_as_edges() {
        assert!(Transition::Enter.is_edge());
        assert!(Transition::Leave.is_edge());
        assert!(!Transition::None.is_edge());
    }

    #[test]
    fn should_display_lowercase_names() {
        assert_eq!(Transition::Enter.to_string(), "enter");
        assert_eq!(Transition::Leave.to_string(), "leave");
        assert_eq!(Transition::None.to_string(), "none");
    }
}
