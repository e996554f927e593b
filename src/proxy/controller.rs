//! Proxy test controller.
//!
//! # State Transitions
//! ```text
//! Idle/Succeeded/Failed → Failed:    a field is blank or the region is unknown
//! Idle/Succeeded/Failed → InFlight:  fields valid, request dispatched
//! InFlight              → Succeeded: payload stored as ProxyResult
//! InFlight              → Failed:    OperationError stored
//! InFlight              → InFlight:  re-trigger rejected, nothing sent
//! ```

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::config::ClientConfig;
use crate::dispatch::{Dispatch, OperationError};
use crate::lifecycle::{LifecycleState, Outcome};
use crate::observability::metrics;
use crate::proxy::artifact::ProxyResult;
use crate::proxy::query::ProxyQuery;

const FLOW: &str = "proxy_test";

/// What the presentation layer renders for the proxy test.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProxyTestSnapshot {
    pub status: LifecycleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProxyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Drives one proxy test at a time against the proxy `/fetch` endpoint.
pub struct ProxyTestController<D> {
    dispatcher: D,
    proxy_base: String,
    state: Mutex<ProxyTestSnapshot>,
}

impl<D: Dispatch> ProxyTestController<D> {
    pub fn new(dispatcher: D, proxy_base: impl Into<String>) -> Self {
        Self {
            dispatcher,
            proxy_base: proxy_base.into(),
            state: Mutex::new(ProxyTestSnapshot::default()),
        }
    }

    pub fn from_config(dispatcher: D, config: &ClientConfig) -> Self {
        Self::new(dispatcher, config.endpoints.proxy_base.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ProxyTestSnapshot> {
        self.state.lock().expect("proxy test state mutex poisoned")
    }

    pub fn snapshot(&self) -> ProxyTestSnapshot {
        self.lock().clone()
    }

    pub fn status(&self) -> LifecycleState {
        self.lock().status
    }

    /// Validate `query`, dispatch it, and record the outcome.
    ///
    /// Returns `Outcome::Rejected` without side effects if a previous test
    /// is still in flight.
    pub async fn run_test(&self, query: &ProxyQuery) -> Outcome {
        let spec = {
            let mut state = self.lock();
            if state.status.is_in_flight() {
                tracing::debug!("Proxy test already in flight, ignoring trigger");
                return Outcome::Rejected;
            }
            state.result = None;
            state.error = None;

            let prepared = query
                .validate()
                .and_then(|validated| validated.to_request(&self.proxy_base));
            match prepared {
                Ok(spec) => {
                    state.status = LifecycleState::InFlight;
                    spec
                }
                Err(err) => {
                    tracing::info!(field = ?err.field, "Proxy test rejected by validation");
                    state.status = LifecycleState::Failed;
                    state.error = Some(err.redact(&query.api_key));
                    metrics::record_controller_run(FLOW, LifecycleState::Failed);
                    return Outcome::Completed(LifecycleState::Failed);
                }
            }
        };

        tracing::info!(region = %query.region.trim(), "Running proxy test");
        let outcome = self.dispatcher.dispatch(spec).await;

        let mut state = self.lock();
        match outcome {
            Ok(raw) => {
                let result = ProxyResult::from_raw(raw);
                tracing::info!(
                    has_html = result.html_artifact.is_some(),
                    "Proxy test succeeded"
                );
                state.result = Some(result);
                state.status = LifecycleState::Succeeded;
            }
            Err(err) => {
                tracing::info!(kind = %err.kind, status = ?err.http_status, "Proxy test failed");
                state.error = Some(err.redact(&query.api_key));
                state.status = LifecycleState::Failed;
            }
        }
        metrics::record_controller_run(FLOW, state.status);
        Outcome::Completed(state.status)
    }
}
