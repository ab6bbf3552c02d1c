//! Application state owned by the top-level controller.
//!
//! Both clients keep exactly one [`AppState`] and change it only through
//! [`AppState::apply`]. Network calls happen outside; their outcomes come
//! back in as [`Action`]s, so overlapping requests resolve last-write-wins.

use chrono::NaiveDate;

use crate::models::{Email, EmailFilter, Task};

/// Shown for every failed login, whatever the cause.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Shown when the email listing answers with a non-success status.
pub const FETCH_EMAILS_FAILED_MESSAGE: &str = "Failed to fetch emails";

/// Message displayed for a rejected sync, carrying the raw response body.
pub fn sync_failed_message(body: &str) -> String {
    format!("Failed to sync emails: {}", body)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Success,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
        }
    }

    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing)
    }
}

/// Bearer credential; authenticated exactly when a token is held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailPane {
    pub emails: Vec<Email>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<Email>,
}

impl Default for EmailPane {
    fn default() -> Self {
        Self {
            emails: Vec::new(),
            loading: true,
            error: None,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPane {
    pub tasks: Vec<Task>,
    pub loading: bool,
}

impl Default for TaskPane {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
        }
    }
}

/// Which top-level view renders. Login and the authenticated views are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Login,
    Inbox,
    Detail(&'a Email),
}

#[derive(Debug, Clone)]
pub enum Action {
    LoggedIn(String),
    LoginFailed,
    LoggedOut,
    SetSearch(String),
    SetStartDate(Option<NaiveDate>),
    SetEndDate(Option<NaiveDate>),
    EmailsLoaded(Vec<Email>),
    EmailsFailed(String),
    TasksRequested,
    TasksLoaded(Vec<Task>),
    TasksFailed,
    SyncStarted,
    SyncSucceeded,
    SyncFailed(String),
    SelectEmail(Email),
    BackToList,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub login_error: Option<String>,
    pub filter: EmailFilter,
    pub emails: EmailPane,
    pub tasks: TaskPane,
    pub sync_status: SyncStatus,
}

impl AppState {
    /// Start-up state, authenticated if a stored token was found.
    pub fn restored(token: Option<String>) -> Self {
        Self {
            session: Session::new(token),
            ..Default::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn view(&self) -> View<'_> {
        if !self.session.is_authenticated() {
            return View::Login;
        }
        match &self.emails.selected {
            Some(email) => View::Detail(email),
            None => View::Inbox,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoggedIn(token) => {
                self.session = Session::new(Some(token));
                self.login_error = None;
            }
            Action::LoginFailed => {
                self.login_error = Some(LOGIN_FAILED_MESSAGE.to_string());
            }
            Action::LoggedOut => {
                *self = AppState::default();
            }
            Action::SetSearch(term) => self.filter.search_term = term,
            Action::SetStartDate(date) => self.filter.start_date = date,
            Action::SetEndDate(date) => self.filter.end_date = date,
            Action::EmailsLoaded(emails) => {
                self.emails.emails = emails;
                self.emails.loading = false;
                self.emails.error = None;
            }
            Action::EmailsFailed(message) => {
                // Previously loaded emails stay; the error is shown in their place.
                self.emails.error = Some(message);
                self.emails.loading = false;
            }
            Action::TasksRequested => self.tasks.loading = true,
            Action::TasksLoaded(tasks) => {
                self.tasks.tasks = tasks;
                self.tasks.loading = false;
            }
            Action::TasksFailed => self.tasks.loading = false,
            Action::SyncStarted => self.sync_status = SyncStatus::Syncing,
            Action::SyncSucceeded => self.sync_status = SyncStatus::Success,
            Action::SyncFailed(message) => {
                self.sync_status = SyncStatus::Error;
                self.emails.error = Some(message);
            }
            Action::SelectEmail(email) => self.emails.selected = Some(email),
            Action::BackToList => self.emails.selected = None,
        }
    }
}
