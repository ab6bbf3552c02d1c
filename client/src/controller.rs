//! Top-level controller: owns the application state and ties the refresh
//! schedule to the session lifecycle.

use std::sync::Arc;

use shared::models::EmailFilter;
use shared::state::{Action, AppState};

use crate::api::MailApi;
use crate::error::ClientResult;
use crate::orchestrator::RefreshOrchestrator;
use crate::schedule::{RefreshIntervals, RefreshSchedule};
use crate::session::SessionGate;
use crate::state::StateHandle;
use crate::storage::TokenStore;

pub struct Controller {
    state: StateHandle,
    gate: SessionGate,
    orchestrator: RefreshOrchestrator,
    intervals: RefreshIntervals,
    schedule: Option<RefreshSchedule>,
}

impl Controller {
    /// Build a controller, restoring a previously stored session if any.
    pub fn new(
        api: Arc<dyn MailApi>,
        store: Arc<dyn TokenStore>,
        intervals: RefreshIntervals,
    ) -> ClientResult<Self> {
        let token = store.load()?;
        if token.is_some() {
            tracing::debug!("Restored stored session token");
        }

        let state = StateHandle::new(AppState::restored(token));
        Ok(Self {
            gate: SessionGate::new(api.clone(), store, state.clone()),
            orchestrator: RefreshOrchestrator::new(api, state.clone()),
            state,
            intervals,
            schedule: None,
        })
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn orchestrator(&self) -> &RefreshOrchestrator {
        &self.orchestrator
    }

    pub fn is_refreshing(&self) -> bool {
        self.schedule.as_ref().is_some_and(RefreshSchedule::is_running)
    }

    /// Log in and, on success, start refreshing.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<()> {
        self.gate.login(username, password).await?;
        self.activate().await;
        Ok(())
    }

    /// Stop the timers and drop the session. Requests already in flight may
    /// still land in the (now reset) state.
    pub fn logout(&mut self) -> ClientResult<()> {
        self.deactivate();
        self.gate.logout()
    }

    /// Initial fetch of emails and tasks, then arm the timers. Does nothing
    /// without a session.
    pub async fn activate(&mut self) {
        if !self.state.read(AppState::is_authenticated) {
            return;
        }

        // Failures are already reflected in state.
        let _ = tokio::join!(
            self.orchestrator.fetch_emails(),
            self.orchestrator.fetch_tasks()
        );

        self.schedule = Some(RefreshSchedule::start(
            self.orchestrator.clone(),
            self.intervals,
        ));
    }

    pub fn deactivate(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.cancel();
        }
    }

    pub fn set_filter(&self, filter: EmailFilter) {
        self.state.apply(Action::SetSearch(filter.search_term));
        self.state.apply(Action::SetStartDate(filter.start_date));
        self.state.apply(Action::SetEndDate(filter.end_date));
    }

    /// Open the detail view of a listed email. Returns `false` if the id is
    /// not in the current list.
    pub fn select_email(&self, id: i64) -> bool {
        let email = self
            .state
            .read(|s| s.emails.emails.iter().find(|e| e.id == id).cloned());

        match email {
            Some(email) => {
                self.state.apply(Action::SelectEmail(email));
                true
            }
            None => false,
        }
    }

    pub fn back_to_list(&self) {
        self.state.apply(Action::BackToList);
    }
}
