//! Presence engine — wires the location store, rule set, evaluator,
//! scheduler and dispatcher into one running pipeline.
//!
//! Reported locations flow into the store; every actual change asks the
//! scheduler for a pass; each pass edge-detects all automations and hands
//! every edge to the dispatcher on its own task.

use std::sync::Arc;

use presencehub_domain::id::EntityId;
use presencehub_domain::location::Location;
use tokio::task::JoinHandle;

use crate::dispatcher::ActionDispatcher;
use crate::evaluator::RuleEvaluator;
use crate::location_store::LocationStore;
use crate::ports::{NotificationSender, UserDirectory};
use crate::rule_set::RuleSet;
use crate::scheduler::{RequestOutcome, SchedulerConfig, TriggerScheduler};

/// Running ingestion and evaluation pipeline.
pub struct PresenceEngine<D> {
    locations: Arc<LocationStore<D>>,
    rules: Arc<RuleSet>,
    scheduler: TriggerScheduler,
}

impl<D> PresenceEngine<D>
where
    D: UserDirectory + Send + Sync + 'static,
{
    /// Spawn the evaluation worker and return the engine with the worker's handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<N>(
        locations: Arc<LocationStore<D>>,
        rules: Arc<RuleSet>,
        dispatcher: Arc<ActionDispatcher<D, N>>,
        config: SchedulerConfig,
    ) -> (Self, JoinHandle<()>)
    where
        N: NotificationSender + Send + Sync + 'static,
    {
        let evaluator = RuleEvaluator::new(Arc::clone(&locations), Arc::clone(&rules));
        let (scheduler, worker) = TriggerScheduler::spawn(config, move || {
            for triggered in evaluator.run_pass() {
                tracing::info!(
                    owner = %triggered.owner,
                    automation_id = %triggered.automation.id,
                    transition = %triggered.transition,
                    "automation triggered"
                );
                dispatcher.dispatch(triggered);
            }
        });

        let engine = Self {
            locations,
            rules,
            scheduler,
        };
        (engine, worker)
    }

    /// Record a reported location and request a pass if it changed anything.
    ///
    /// Returns `None` when the report was ignored (unknown entity or same
    /// location), otherwise the scheduler's answer.
    pub fn report_location(
        &self,
        entity: &EntityId,
        location: &Location,
    ) -> Option<RequestOutcome> {
        if !self.locations.set(entity, location) {
            tracing::trace!(%entity, %location, "location report ignored");
            return None;
        }
        tracing::debug!(%entity, %location, "location changed");
        Some(self.scheduler.request())
    }

    #[must_use]
    pub fn locations(&self) -> &Arc<LocationStore<D>> {
        &self.locations
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }
}
