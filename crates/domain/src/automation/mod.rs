//! Automation — location conditions with enter/leave actions.
//!
//! An automation belongs to an owner and lists where a set of entities must
//! be. When all of them are there the automation *enters* and its enter
//! actions are delivered to the owner; when any of them leaves it *leaves*
//! and its leave actions are delivered. Each edge fires exactly once: the
//! `armed` flag remembers which side of the edge the automation is on.
//!
//! An automation with no conditions is vacuously satisfied. It enters on the
//! first evaluation after it is loaded and never fires again.

mod action;
mod transition;

pub use action::Action;
pub use transition::Transition;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PresenceHubError, ValidationError};
use crate::id::{AutomationId, EntityId};
use crate::location::{Location, LocationSnapshot};

/// An owner-defined rule fired on collective enter/leave of locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    #[serde(default)]
    pub id: AutomationId,
    #[serde(alias = "Me")]
    pub owner: EntityId,
    /// Required location per entity. All must hold for the rule to be satisfied.
    #[serde(
        default,
        alias = "Locations",
        alias = "locations",
        deserialize_with = "null_as_default"
    )]
    pub conditions: BTreeMap<EntityId, Location>,
    #[serde(
        default,
        alias = "Actions",
        alias = "actions",
        deserialize_with = "null_as_default"
    )]
    pub enter_actions: Vec<Action>,
    #[serde(default, alias = "LeaveActions", deserialize_with = "null_as_default")]
    pub leave_actions: Vec<Action>,
    /// Whether the last edge was an enter. Volatile, never persisted.
    #[serde(skip)]
    armed: bool,
}

/// Decode an explicit `null` the same way as a missing field.
///
/// Documents written by earlier deployments store empty lists as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Whether the automation currently considers itself inside.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Take over the armed flag of the automation this one replaces.
    ///
    /// The flag only carries over when the conditions are identical; new
    /// conditions start unarmed and are judged afresh on the next pass.
    pub fn carry_over_state(&mut self, previous: &Self) {
        self.armed = self.conditions == previous.conditions && previous.armed;
    }

    /// Whether every condition holds in `snapshot`.
    #[must_use]
    pub fn is_satisfied(&self, snapshot: &LocationSnapshot) -> bool {
        self.conditions
            .iter()
            .all(|(entity, required)| snapshot.is_at(entity.as_str(), required))
    }

    /// Edge-detect against `snapshot`, updating the armed flag in place.
    ///
    /// Returns [`Transition::Enter`] when the conditions just became
    /// satisfied, [`Transition::Leave`] when they just stopped being
    /// satisfied after an enter, and [`Transition::None`] otherwise.
    pub fn evaluate(&mut self, snapshot: &LocationSnapshot) -> Transition {
        match (self.is_satisfied(snapshot), self.armed) {
            (true, false) => {
                self.armed = true;
                Transition::Enter
            }
            (false, true) => {
                self.armed = false;
                Transition::Leave
            }
            _ => Transition::None,
        }
    }

    /// Actions to deliver for `transition`.
    #[must_use]
    pub fn actions_for(&self, transition: Transition) -> &[Action] {
        match transition {
            Transition::Enter => &self.enter_actions,
            Transition::Leave => &self.leave_actions,
            Transition::None => &[],
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::Validation`] when:
    /// - `owner` is empty ([`ValidationError::EmptyOwner`])
    /// - a condition names an empty entity or location
    /// - any action is invalid (see [`Action::validate`])
    pub fn validate(&self) -> Result<(), PresenceHubError> {
        if self.owner.is_empty() {
            return Err(ValidationError::EmptyOwner.into());
        }
        for (entity, location) in &self.conditions {
            if entity.is_empty() {
                return Err(ValidationError::EmptyEntityId.into());
            }
            if location.is_empty() {
                return Err(ValidationError::EmptyLocation.into());
            }
        }
        for action in self.enter_actions.iter().chain(&self.leave_actions) {
            action.validate()?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    owner: Option<EntityId>,
    conditions: BTreeMap<EntityId, Location>,
    enter_actions: Vec<Action>,
    leave_actions: Vec<Action>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Require `entity` to be at `location`.
    #[must_use]
    pub fn condition(mut self, entity: EntityId, location: Location) -> Self {
        self.conditions.insert(entity, location);
        self
    }

    #[must_use]
    pub fn on_enter(mut self, action: Action) -> Self {
        self.enter_actions.push(action);
        self
    }

    #[must_use]
    pub fn on_leave(mut self, action: Action) -> Self {
        self.leave_actions.push(action);
        self
    }

    /// Consume the builder, validate, and return an unarmed [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`PresenceHubError::Validation`] if the owner is missing or
    /// any field is invalid.
    pub fn build(self) -> Result<Automation, PresenceHubError> {
        let owner = self.owner.ok_or(ValidationError::EmptyOwner)?;
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            owner,
            conditions: self.conditions,
            enter_actions: self.enter_actions,
            leave_actions: self.leave_actions,
            armed: false,
        };
        automation.validate()?;
        Ok(automation)
    }
}
