//! Data refresh orchestrator: the email, task and sync operations behind
//! both the manual controls and the recurring timers.
//!
//! Nothing here is serialized. A manual sync can overlap a scheduled one and
//! whichever response lands last is what the state shows.

use std::sync::Arc;

use shared::state::{sync_failed_message, Action, FETCH_EMAILS_FAILED_MESSAGE};

use crate::api::MailApi;
use crate::error::{ClientError, ClientResult};
use crate::state::StateHandle;

#[derive(Clone)]
pub struct RefreshOrchestrator {
    api: Arc<dyn MailApi>,
    state: StateHandle,
}

impl RefreshOrchestrator {
    pub fn new(api: Arc<dyn MailApi>, state: StateHandle) -> Self {
        Self { api, state }
    }

    fn token(&self) -> ClientResult<String> {
        self.state
            .read(|s| s.session.token().map(str::to_string))
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Reload the email list for the current filter.
    pub async fn fetch_emails(&self) -> ClientResult<()> {
        let token = self.token()?;
        let filter = self.state.read(|s| s.filter.clone());

        match self.api.fetch_emails(&token, &filter).await {
            Ok(emails) => {
                tracing::debug!("Fetched {} emails", emails.len());
                self.state.apply(Action::EmailsLoaded(emails));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Fetch error: {}", e);
                let message = match &e {
                    ClientError::Status { .. } => FETCH_EMAILS_FAILED_MESSAGE.to_string(),
                    other => other.to_string(),
                };
                self.state.apply(Action::EmailsFailed(message));
                Err(e)
            }
        }
    }

    /// Reload extracted tasks. Failures are logged, never shown.
    pub async fn fetch_tasks(&self) -> ClientResult<()> {
        let token = self.token()?;
        self.state.apply(Action::TasksRequested);

        match self.api.fetch_tasks(&token).await {
            Ok(tasks) => {
                tracing::debug!("Fetched {} tasks", tasks.len());
                self.state.apply(Action::TasksLoaded(tasks));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching tasks: {}", e);
                self.state.apply(Action::TasksFailed);
                Err(e)
            }
        }
    }

    /// Ask the service to pull new mail, then reload the list once on success.
    pub async fn sync_emails(&self) -> ClientResult<()> {
        let token = self.token()?;
        tracing::info!("Sync started");
        self.state.apply(Action::SyncStarted);

        match self.api.sync_emails(&token).await {
            Ok(body) => {
                tracing::info!("Sync finished: {}", body);
                self.state.apply(Action::SyncSucceeded);
                self.fetch_emails().await
            }
            Err(e) => {
                tracing::error!("Sync error: {}", e);
                let message = match &e {
                    ClientError::Status { body, .. } => sync_failed_message(body),
                    other => other.to_string(),
                };
                self.state.apply(Action::SyncFailed(message));
                Err(e)
            }
        }
    }
}
