//! Rule set — every owner's ordered automations behind a read/write lock.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use presencehub_domain::automation::Automation;
use presencehub_domain::error::{NotFoundError, ValidationError};
use presencehub_domain::id::{AutomationId, EntityId};

/// Automations grouped by owner, in insertion order within each owner.
pub type AutomationsByOwner = BTreeMap<EntityId, Vec<Automation>>;

/// Authoritative in-memory store of automations.
///
/// Evaluation passes and administrative changes both take the write lock:
/// a pass mutates each stored automation's armed flag in place, so it must
/// never work on copies. Listing takes the read lock.
#[derive(Debug, Default)]
pub struct RuleSet {
    owners: RwLock<AutomationsByOwner>,
}

impl RuleSet {
    /// Create a rule set from a loaded document. Every automation starts unarmed.
    ///
    /// Automations are filed under their `owner`. One without an owner takes
    /// the key it was stored under; one stored under another owner's key is
    /// moved to its own owner.
    #[must_use]
    pub fn new(document: AutomationsByOwner) -> Self {
        let mut owners = AutomationsByOwner::new();
        for (key, list) in document {
            for mut automation in list {
                if automation.owner.is_empty() {
                    automation.owner = key.clone();
                } else if automation.owner != key {
                    tracing::warn!(
                        %key,
                        owner = %automation.owner,
                        automation_id = %automation.id,
                        "automation stored under another owner, filing it under its own"
                    );
                }
                owners
                    .entry(automation.owner.clone())
                    .or_default()
                    .push(automation);
            }
        }
        Self {
            owners: RwLock::new(owners),
        }
    }

    /// Look up an automation by id.
    #[must_use]
    pub fn get(&self, id: AutomationId) -> Option<Automation> {
        self.read().values().flatten().find(|a| a.id == id).cloned()
    }

    /// Automations owned by `owner`, in order.
    #[must_use]
    pub fn list_for_owner(&self, owner: &EntityId) -> Vec<Automation> {
        self.read().get(owner).cloned().unwrap_or_default()
    }

    /// Every automation, grouped by owner name then in order.
    #[must_use]
    pub fn list(&self) -> Vec<Automation> {
        self.read().values().flatten().cloned().collect()
    }

    /// Total number of automations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `automation` to its owner's list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateId`] when an automation with the
    /// same id is already stored.
    pub fn insert(&self, automation: Automation) -> Result<(), ValidationError> {
        let mut owners = self.write();
        if position(&owners, automation.id).is_some() {
            return Err(ValidationError::DuplicateId(automation.id.to_string()));
        }
        owners
            .entry(automation.owner.clone())
            .or_default()
            .push(automation);
        Ok(())
    }

    /// Replace the stored automation with the same id.
    ///
    /// Keeps its position when the owner is unchanged; otherwise it moves to
    /// the end of the new owner's list. The armed flag is carried over when
    /// the conditions did not change. Returns the replaced automation.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no automation has that id.
    pub fn replace(&self, mut automation: Automation) -> Result<Automation, NotFoundError> {
        let mut owners = self.write();
        let (owner, index) = position(&owners, automation.id).ok_or_else(|| NotFoundError {
            entity: "Automation",
            id: automation.id.to_string(),
        })?;

        if owner == automation.owner {
            let list = owners.entry(owner).or_default();
            automation.carry_over_state(&list[index]);
            return Ok(std::mem::replace(&mut list[index], automation));
        }

        let previous = remove_at(&mut owners, &owner, index);
        automation.carry_over_state(&previous);
        owners
            .entry(automation.owner.clone())
            .or_default()
            .push(automation);
        Ok(previous)
    }

    /// Remove the automation with `id`, returning it if it existed.
    pub fn remove(&self, id: AutomationId) -> Option<Automation> {
        let mut owners = self.write();
        let (owner, index) = position(&owners, id)?;
        Some(remove_at(&mut owners, &owner, index))
    }

    /// Copy of every automation, as persisted.
    #[must_use]
    pub fn to_document(&self) -> AutomationsByOwner {
        self.read().clone()
    }

    /// Exclusive access to the stored automations for an evaluation pass.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, AutomationsByOwner> {
        self.owners.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, AutomationsByOwner> {
        self.owners.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn position(owners: &AutomationsByOwner, id: AutomationId) -> Option<(EntityId, usize)> {
    owners.iter().find_map(|(owner, list)| {
        list.iter()
            .position(|a| a.id == id)
            .map(|index| (owner.clone(), index))
    })
}

fn remove_at(owners: &mut AutomationsByOwner, owner: &EntityId, index: usize) -> Automation {
    let list = owners.entry(owner.clone()).or_default();
    let removed = list.remove(index);
    if list.is_empty() {
        owners.remove(owner);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use presencehub_domain::automation::{Action, Transition};
    use presencehub_domain::location::{Location, LocationSnapshot};

    fn entity(s: &str) -> EntityId {
        EntityId::new(s).unwrap()
    }

    fn automation(owner: &str, room: &str) -> Automation {
        Automation::builder()
            .owner(entity(owner))
            .condition(entity(owner), Location::new(room).unwrap())
            .build()
            .unwrap()
    }

    fn at(owner: &str, room: &str) -> LocationSnapshot {
        [(entity(owner), Location::new(room).unwrap())]
            .into_iter()
            .collect()
    }

    #[test]
    fn should_keep_insertion_order_per_owner() {
        let rules = RuleSet::default();
        let first = automation("alice", "kitchen");
        let second = automation("alice", "garage");
        rules.insert(first.clone()).unwrap();
        rules.insert(second.clone()).unwrap();

        let ids: Vec<AutomationId> = rules
            .list_for_owner(&entity("alice"))
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn should_return_empty_list_for_owner_without_automations() {
        let rules = RuleSet::default();
        assert!(rules.list_for_owner(&entity("nobody")).is_empty());
        assert!(rules.is_empty());
    }

    #[test]
    fn should_get_automation_by_id() {
        let rules = RuleSet::default();
        let auto = automation("alice", "kitchen");
        rules.insert(auto.clone()).unwrap();
        assert_eq!(rules.get(auto.id).map(|a| a.id), Some(auto.id));
        assert!(rules.get(AutomationId::new()).is_none());
    }

    #[test]
    fn should_replace_in_place_and_keep_armed_flag() {
        let rules = RuleSet::default();
        let first = automation("alice", "kitchen");
        let second = automation("alice", "garage");
        rules.insert(first.clone()).unwrap();
        rules.insert(second.clone()).unwrap();

        for list in rules.write().values_mut() {
            for auto in list.iter_mut() {
                auto.evaluate(&at("alice", "kitchen"));
            }
        }

        let mut updated = first.clone();
        updated.enter_actions.push(Action::new("light", "on"));
        let previous = rules.replace(updated).unwrap();
        assert!(previous.enter_actions.is_empty());

        let list = rules.list_for_owner(&entity("alice"));
        assert_eq!(list[0].id, first.id);
        assert_eq!(list[0].enter_actions.len(), 1);
        assert!(list[0].is_armed());
        assert_eq!(list[1].id, second.id);
    }

    #[test]
    fn should_move_automation_when_owner_changes() {
        let rules = RuleSet::default();
        let auto = automation("alice", "kitchen");
        rules.insert(auto.clone()).unwrap();

        let mut moved = auto.clone();
        moved.owner = entity("bob");
        rules.replace(moved).unwrap();

        assert!(rules.list_for_owner(&entity("alice")).is_empty());
        assert_eq!(rules.list_for_owner(&entity("bob"))[0].id, auto.id);
        assert!(!rules.to_document().contains_key("alice"));
    }

    #[test]
    fn should_fail_to_replace_unknown_automation() {
        let rules = RuleSet::default();
        let err = rules.replace(automation("alice", "kitchen")).unwrap_err();
        assert_eq!(err.entity, "Automation");
    }

    #[test]
    fn should_remove_automation_and_drop_empty_owner() {
        let rules = RuleSet::default();
        let auto = automation("alice", "kitchen");
        rules.insert(auto.clone()).unwrap();

        let removed = rules.remove(auto.id).unwrap();
        assert_eq!(removed.id, auto.id);
        assert!(rules.remove(auto.id).is_none());
        assert!(rules.to_document().is_empty());
    }

    #[test]
    fn should_reject_duplicate_id_on_insert() {
        let rules = RuleSet::default();
        let auto = automation("alice", "kitchen");
        rules.insert(auto.clone()).unwrap();

        let mut copy = automation("bob", "garage");
        copy.id = auto.id;
        assert!(matches!(
            rules.insert(copy),
            Err(ValidationError::DuplicateId(_))
        ));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn should_file_loaded_automation_under_its_owner() {
        let auto = automation("bob", "garage");
        let mut doc = AutomationsByOwner::new();
        doc.insert(entity("alice"), vec![auto.clone()]);
        let rules = RuleSet::new(doc);

        assert!(rules.list_for_owner(&entity("alice")).is_empty());
        assert_eq!(rules.list_for_owner(&entity("bob"))[0].id, auto.id);

        let mut moved = auto.clone();
        moved.enter_actions.push(Action::new("light", "on"));
        rules.replace(moved).unwrap();
        assert_eq!(rules.list_for_owner(&entity("bob"))[0].enter_actions.len(), 1);
    }

    #[test]
    fn should_adopt_storage_key_when_loaded_owner_is_empty() {
        let doc: AutomationsByOwner = serde_json::from_value(serde_json::json!({
            "alice": [{"Me": "", "Locations": {"alice": "kitchen"}, "Actions": null, "LeaveActions": null}]
        }))
        .unwrap();
        let rules = RuleSet::new(doc);

        let list = rules.list_for_owner(&entity("alice"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].owner, entity("alice"));
        assert!(list[0].validate().is_ok());
    }

    #[test]
    fn should_start_loaded_automations_unarmed() {
        let auto = automation("alice", "kitchen");
        let mut doc = AutomationsByOwner::new();
        doc.insert(entity("alice"), vec![auto]);
        let rules = RuleSet::new(doc);

        let mut owners = rules.write();
        let stored = &mut owners.get_mut("alice").unwrap()[0];
        assert!(!stored.is_armed());
        assert_eq!(stored.evaluate(&at("alice", "kitchen")), Transition::Enter);
    }
}
