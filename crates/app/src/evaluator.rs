//! Rule evaluator — one pass of edge detection over every automation.

use std::sync::Arc;

use presencehub_domain::automation::{Automation, Transition};
use presencehub_domain::id::EntityId;

use crate::location_store::LocationStore;
use crate::ports::UserDirectory;
use crate::rule_set::RuleSet;

/// An automation that crossed an edge during a pass.
#[derive(Debug, Clone)]
pub struct TriggeredAutomation {
    pub owner: EntityId,
    pub transition: Transition,
    /// Copy of the automation as it stood after evaluation.
    pub automation: Automation,
}

/// Compares the current locations against every automation.
pub struct RuleEvaluator<D> {
    locations: Arc<LocationStore<D>>,
    rules: Arc<RuleSet>,
}

impl<D: UserDirectory> RuleEvaluator<D> {
    pub fn new(locations: Arc<LocationStore<D>>, rules: Arc<RuleSet>) -> Self {
        Self { locations, rules }
    }

    /// Run a single evaluation pass.
    ///
    /// Takes one location snapshot, then holds the rule set's write lock
    /// while each stored automation is edge-detected in place. Returns the
    /// automations that entered or left, in owner then insertion order.
    pub fn run_pass(&self) -> Vec<TriggeredAutomation> {
        let snapshot = self.locations.snapshot();
        let mut owners = self.rules.write();

        let mut triggered = Vec::new();
        for (owner, automations) in owners.iter_mut() {
            for automation in automations.iter_mut() {
                let transition = automation.evaluate(&snapshot);
                if transition.is_edge() {
                    tracing::debug!(
                        owner = %owner,
                        automation_id = %automation.id,
                        %transition,
                        "automation crossed edge"
                    );
                    triggered.push(TriggeredAutomation {
                        owner: owner.clone(),
                        transition,
                        automation: automation.clone(),
                    });
                }
            }
        }
        triggered
    }
}
