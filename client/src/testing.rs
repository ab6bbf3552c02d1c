//! In-memory stand-in for the mail service, shared by unit tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use shared::api::{LoginRequest, TokenResponse};
use shared::models::{Email, EmailFilter, Task};

use crate::api::MailApi;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub logins: usize,
    pub email_fetches: usize,
    pub task_fetches: usize,
    pub syncs: usize,
}

#[derive(Default)]
pub struct FakeMailApi {
    calls: Mutex<Calls>,
    filters: Mutex<Vec<EmailFilter>>,
    emails: Mutex<Vec<Email>>,
    tasks: Mutex<Vec<Task>>,
    email_failure: Mutex<Option<(u16, String)>>,
    task_failure: Mutex<bool>,
    sync_failure: Mutex<Option<String>>,
}

fn status_error(code: u16, body: &str) -> ClientError {
    ClientError::Status {
        status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body: body.to_string(),
    }
}

pub fn email(id: i64, subject: &str) -> Email {
    Email {
        id,
        subject: subject.to_string(),
        sender: "ops@example.com".to_string(),
        recipient: "me@example.com".to_string(),
        body: format!("Body of {}", subject),
        date: Utc.with_ymd_and_hms(2025, 2, 7, 9, 30, 0).unwrap(),
        raw_json: None,
    }
}

pub fn task(description: &str, assignee: &str) -> Task {
    Task {
        id: None,
        description: description.to_string(),
        assignee: assignee.to_string(),
        deadline: None,
        priority: None,
        category: None,
        status: None,
    }
}

impl FakeMailApi {
    pub const PASSWORD: &'static str = "admin123";
    pub const TOKEN: &'static str = "fake-token";

    pub fn with_emails(emails: Vec<Email>) -> Self {
        let api = Self::default();
        api.set_emails(emails);
        api
    }

    pub fn set_emails(&self, emails: Vec<Email>) {
        *self.emails.lock().unwrap_or_else(PoisonError::into_inner) = emails;
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = tasks;
    }

    pub fn fail_emails(&self, code: u16, body: &str) {
        *self.email_failure.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((code, body.to_string()));
    }

    pub fn fail_tasks(&self) {
        *self.task_failure.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn fail_sync(&self, body: &str) {
        *self.sync_failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(body.to_string());
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn filters(&self) -> Vec<EmailFilter> {
        self.filters.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.calls.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn authorize(token: &str) -> ClientResult<()> {
        if token == Self::TOKEN {
            Ok(())
        } else {
            Err(status_error(401, "Could not validate credentials"))
        }
    }
}

#[async_trait]
impl MailApi for FakeMailApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        self.record(|c| c.logins += 1);
        if request.password != Self::PASSWORD {
            return Err(status_error(401, "Incorrect username or password"));
        }
        Ok(TokenResponse {
            access_token: Self::TOKEN.to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn fetch_emails(&self, token: &str, filter: &EmailFilter) -> ClientResult<Vec<Email>> {
        self.record(|c| c.email_fetches += 1);
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(filter.clone());
        Self::authorize(token)?;

        if let Some((code, body)) = self
            .email_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(status_error(code, &body));
        }
        Ok(self.emails.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn fetch_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        self.record(|c| c.task_fetches += 1);
        Self::authorize(token)?;

        if *self.task_failure.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(status_error(500, "Task extraction unavailable"));
        }
        Ok(self.tasks.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn sync_emails(&self, token: &str) -> ClientResult<String> {
        self.record(|c| c.syncs += 1);
        Self::authorize(token)?;

        match self
            .sync_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            Some(body) => Err(status_error(500, &body)),
            None => Ok(r#"{"message":"Successfully synced 0 new emails"}"#.to_string()),
        }
    }
}
