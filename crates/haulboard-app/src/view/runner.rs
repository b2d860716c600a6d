//! Async driver for a `ViewController`
//!
//! Performs the reducer's effects: fetches run on the blocking pool under a
//! timeout, notifications go to the configured `Notifier`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use haulboard_domain::model::Record;
use haulboard_domain::repository::RecordStore;
use haulboard_domain::service::Aggregator;
use haulboard_types::{Error, FetchError, Result};
use tracing::{info, warn};

use super::controller::{validation_title, Effect, FetchTicket, ViewAction, ViewController};
use crate::notify::{Notification, Notifier};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ViewRunner<R: Record, A: Aggregator<R>> {
    controller: ViewController<R, A>,
    store: Arc<dyn RecordStore<R>>,
    notifier: Arc<dyn Notifier>,
    fetch_timeout: Duration,
}

impl<R: Record, A: Aggregator<R>> ViewRunner<R, A> {
    pub fn new(
        controller: ViewController<R, A>,
        store: Arc<dyn RecordStore<R>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            controller,
            store,
            notifier,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn controller(&self) -> &ViewController<R, A> {
        &self.controller
    }

    pub fn into_controller(self) -> ViewController<R, A> {
        self.controller
    }

    /// Load (or reload) the snapshot
    pub async fn refresh(&mut self) -> Result<()> {
        self.dispatch(ViewAction::Refresh).await
    }

    /// Dispatch an action and carry out every effect it leads to.
    ///
    /// Rejected input is reported through the notifier and returned.
    pub async fn dispatch(&mut self, action: ViewAction<R>) -> Result<()> {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            let effects = match self.controller.dispatch(action) {
                Ok(effects) => effects,
                Err(e) => {
                    if let Error::Validation(v) = &e {
                        self.notifier
                            .notify(&Notification::destructive(validation_title(v), v.to_string()));
                    }
                    return Err(e);
                }
            };
            for effect in effects {
                match effect {
                    Effect::Notify(notification) => self.notifier.notify(&notification),
                    Effect::Fetch(ticket) => queue.push_back(self.fetch(ticket).await),
                }
            }
        }
        Ok(())
    }

    async fn fetch(&self, ticket: FetchTicket) -> ViewAction<R> {
        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || store.fetch_records());

        let outcome = match tokio::time::timeout(self.fetch_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(FetchError::Unavailable {
                kind: R::KIND,
                reason: join_error.to_string(),
            }
            .into()),
            Err(_) => Err(FetchError::TimedOut {
                kind: R::KIND,
                timeout_ms: u64::try_from(self.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
            }
            .into()),
        };

        match outcome {
            Ok(records) => {
                info!(kind = %R::KIND, count = records.len(), ticket = ticket.generation(), "fetched");
                ViewAction::Loaded { ticket, records }
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, ticket = ticket.generation(), "fetch failed");
                let message = match &e {
                    Error::Fetch(fetch) => fetch.reason(),
                    other => other.to_string(),
                };
                ViewAction::Failed { ticket, message }
            }
        }
    }
}
