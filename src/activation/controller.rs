//! Account activation controller.
//!
//! # State Transitions
//! ```text
//! Idle/Failed → Idle:      token missing, or password/confirmation invalid
//! Idle/Failed → InFlight:  token present, passwords valid, request dispatched
//! InFlight    → Succeeded: redirect pending, password fields cleared
//! InFlight    → Failed:    error surfaced verbatim, fields kept for retry
//! InFlight    → InFlight:  re-trigger rejected, nothing sent
//! ```
//!
//! The token check runs before any password check.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::json;

use crate::activation::locator::{Locator, TOKEN_PARAM};
use crate::activation::password::{PasswordForm, PasswordPolicy};
use crate::config::ClientConfig;
use crate::dispatch::{Dispatch, DispatchResult, Method, OperationError, RequestSpec};
use crate::lifecycle::{LifecycleState, Outcome};
use crate::observability::metrics;

const FLOW: &str = "activation";

pub const ACTIVATE_PATH: &str = "/v2/activate";
pub const MISSING_TOKEN_MESSAGE: &str = "Activation token is missing.";
pub const SUCCESS_NOTICE: &str = "Account activated successfully.";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Everything needed for one activation attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ActivationRequest {
    pub fn validate(&self, policy: &PasswordPolicy) -> DispatchResult<()> {
        if self.token.is_empty() {
            return Err(OperationError::validation(MISSING_TOKEN_MESSAGE).on_field(TOKEN_PARAM));
        }
        PasswordForm::new(self.new_password.as_str(), self.confirm_password.as_str()).validate(policy)
    }

    /// `POST {api_base}/v2/activate` with `{token, new_password}`.
    pub fn to_request(&self, api_base: &str) -> DispatchResult<RequestSpec> {
        let endpoint = format!("{}{}", api_base.trim_end_matches('/'), ACTIVATE_PATH);

        Ok(RequestSpec::new(Method::Post, &endpoint)?
            .header("content-type", "application/json")?
            .header("accept", "application/json")?
            .json_body(json!({
                "token": self.token,
                "new_password": self.new_password,
            })))
    }

    /// Strip the token and password from a server-provided message.
    fn scrub(&self, err: OperationError) -> OperationError {
        err.redact(&self.new_password).redact(&self.token)
    }
}

impl fmt::Debug for ActivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationRequest")
            .field("token", &"<redacted>")
            .field("new_password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

/// Signal to notify the user and navigate after a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub notice: String,
    pub location: String,
}

/// What the presentation layer renders for the activation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivationSnapshot {
    pub status: LifecycleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

#[derive(Default)]
struct ActivationState {
    snapshot: ActivationSnapshot,
    form: PasswordForm,
}

/// Exchanges a locator-provided token plus a new password for an
/// activated account.
pub struct ActivationController<D, L> {
    dispatcher: D,
    locator: L,
    api_base: String,
    policy: PasswordPolicy,
    login_path: String,
    state: Mutex<ActivationState>,
}

impl<D: Dispatch, L: Locator> ActivationController<D, L> {
    pub fn new(dispatcher: D, locator: L, api_base: impl Into<String>) -> Self {
        Self {
            dispatcher,
            locator,
            api_base: api_base.into(),
            policy: PasswordPolicy::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            state: Mutex::new(ActivationState::default()),
        }
    }

    pub fn from_config(dispatcher: D, locator: L, config: &ClientConfig) -> Self {
        Self::new(dispatcher, locator, config.endpoints.api_base.clone())
            .with_policy(PasswordPolicy::new(config.activation.min_password_length))
            .with_login_path(config.activation.login_path.clone())
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    fn lock(&self) -> MutexGuard<'_, ActivationState> {
        self.state.lock().expect("activation state mutex poisoned")
    }

    pub fn snapshot(&self) -> ActivationSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn status(&self) -> LifecycleState {
        self.lock().snapshot.status
    }

    pub fn set_new_password(&self, value: impl Into<String>) {
        self.lock().form.set_new_password(value);
    }

    pub fn set_confirm_password(&self, value: impl Into<String>) {
        self.lock().form.set_confirm_password(value);
    }

    /// Copy of the current form; mostly useful for presentation and tests.
    pub fn form(&self) -> PasswordForm {
        self.lock().form.clone()
    }

    /// Validate the token and form, then exchange them for an activated
    /// account.
    pub async fn activate(&self) -> Outcome {
        let (spec, request) = {
            let mut state = self.lock();
            if state.snapshot.status.is_in_flight() {
                tracing::debug!("Activation already in flight, ignoring submit");
                return Outcome::Rejected;
            }
            state.snapshot.error = None;
            state.snapshot.redirect = None;

            let token = self
                .locator
                .query_param(TOKEN_PARAM)
                .filter(|token| !token.is_empty());
            let Some(token) = token else {
                tracing::info!("Activation token missing from page location");
                return Self::reject(
                    &mut state,
                    OperationError::validation(MISSING_TOKEN_MESSAGE).on_field(TOKEN_PARAM),
                );
            };

            let request = ActivationRequest {
                token,
                new_password: state.form.new_password().to_string(),
                confirm_password: state.form.confirm_password().to_string(),
            };
            let prepared = request
                .validate(&self.policy)
                .and_then(|()| request.to_request(&self.api_base));
            match prepared {
                Ok(spec) => {
                    state.snapshot.status = LifecycleState::InFlight;
                    (spec, request)
                }
                Err(err) => {
                    tracing::info!(field = ?err.field, "Activation rejected by validation");
                    let err = request.scrub(err);
                    return Self::reject(&mut state, err);
                }
            }
        };

        tracing::info!("Submitting account activation");
        let outcome = self.dispatcher.dispatch(spec).await;

        let mut state = self.lock();
        match outcome {
            Ok(_) => {
                tracing::info!(location = %self.login_path, "Account activated");
                state.form.clear();
                state.snapshot.status = LifecycleState::Succeeded;
                state.snapshot.redirect = Some(Redirect {
                    notice: SUCCESS_NOTICE.to_string(),
                    location: self.login_path.clone(),
                });
            }
            Err(err) => {
                tracing::info!(kind = %err.kind, status = ?err.http_status, "Activation failed");
                state.snapshot.error = Some(request.scrub(err));
                state.snapshot.status = LifecycleState::Failed;
            }
        }
        metrics::record_controller_run(FLOW, state.snapshot.status);
        Outcome::Completed(state.snapshot.status)
    }

    fn reject(state: &mut ActivationState, err: OperationError) -> Outcome {
        state.snapshot.status = LifecycleState::Idle;
        state.snapshot.error = Some(err);
        metrics::record_controller_run(FLOW, LifecycleState::Idle);
        Outcome::Completed(LifecycleState::Idle)
    }
}
