//! Action dispatcher — delivers a triggered automation's actions to its owner.
//!
//! Delivery is fire-and-forget. Failures are logged and dropped; nothing is
//! retried and nothing flows back to the evaluation worker.

use std::sync::Arc;
use std::time::Duration;

use crate::evaluator::TriggeredAutomation;
use crate::ports::{NotificationSender, UserDirectory};

/// Default bound on a single send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened to one triggered automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The sender accepted the payload.
    Delivered,
    /// The owner is not registered, so there is nowhere to deliver.
    UnknownOwner,
    /// The action list for the transition was empty.
    NoActions,
    /// Encoding, sending or the send timeout failed.
    Failed,
}

/// Resolves owners and hands encoded action lists to the sender.
pub struct ActionDispatcher<D, N> {
    directory: D,
    sender: N,
    send_timeout: Duration,
}

impl<D, N> ActionDispatcher<D, N>
where
    D: UserDirectory + Send + Sync + 'static,
    N: NotificationSender + Send + Sync + 'static,
{
    pub fn new(directory: D, sender: N, send_timeout: Duration) -> Self {
        Self {
            directory,
            sender,
            send_timeout,
        }
    }

    /// Deliver `triggered` on its own task and return immediately.
    pub fn dispatch(self: &Arc<Self>, triggered: TriggeredAutomation) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.deliver(&triggered).await;
        });
    }

    /// Perform one delivery inline.
    pub async fn deliver(&self, triggered: &TriggeredAutomation) -> DispatchOutcome {
        let automation_id = triggered.automation.id;
        let Some(address) = self.directory.resolve_address(&triggered.owner) else {
            tracing::debug!(owner = %triggered.owner, %automation_id, "owner not registered, skipping");
            return DispatchOutcome::UnknownOwner;
        };

        let actions = triggered.automation.actions_for(triggered.transition);
        if actions.is_empty() {
            tracing::debug!(
                owner = %triggered.owner,
                %automation_id,
                transition = %triggered.transition,
                "no actions for transition"
            );
            return DispatchOutcome::NoActions;
        }

        let payload = match serde_json::to_string(actions) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%automation_id, error = %err, "failed to encode actions");
                return DispatchOutcome::Failed;
            }
        };

        match tokio::time::timeout(self.send_timeout, self.sender.send(&address, &payload)).await
        {
            Ok(Ok(())) => {
                tracing::info!(
                    owner = %triggered.owner,
                    %automation_id,
                    transition = %triggered.transition,
                    actions = actions.len(),
                    "actions delivered"
                );
                DispatchOutcome::Delivered
            }
            Ok(Err(err)) => {
                tracing::warn!(owner = %triggered.owner, %automation_id, error = %err, "delivery failed");
                DispatchOutcome::Failed
            }
            Err(_) => {
                tracing::warn!(
                    owner = %triggered.owner,
                    %automation_id,
                    timeout = ?self.send_timeout,
                    "delivery timed out"
                );
                DispatchOutcome::Failed
            }
        }
    }
}
