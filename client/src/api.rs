//! Transport to the external mail service.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use shared::api::{
    bearer, emails_url, endpoint, LoginRequest, TasksResponse, TokenResponse, SYNC_PATH,
    TASKS_PATH, TOKEN_PATH,
};
use shared::models::{Email, EmailFilter, Task};

use crate::error::{ClientError, ClientResult};

/// The four calls the client makes. Implemented over HTTP by
/// [`HttpMailApi`]; tests substitute their own.
#[async_trait]
pub trait MailApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse>;

    async fn fetch_emails(&self, token: &str, filter: &EmailFilter) -> ClientResult<Vec<Email>>;

    async fn fetch_tasks(&self, token: &str) -> ClientResult<Vec<Task>>;

    /// Returns the raw success body.
    async fn sync_emails(&self, token: &str) -> ClientResult<String>;
}

pub struct HttpMailApi {
    client: Client,
    base_url: String,
}

impl HttpMailApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MailApi for HttpMailApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        let response = self
            .client
            .post(endpoint(&self.base_url, TOKEN_PATH))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request.form_body())
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn fetch_emails(&self, token: &str, filter: &EmailFilter) -> ClientResult<Vec<Email>> {
        let url = emails_url(&self.base_url, filter);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, bearer(token))
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn fetch_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        let response = self
            .client
            .get(endpoint(&self.base_url, TASKS_PATH))
            .header(header::AUTHORIZATION, bearer(token))
            .send()
            .await?;

        let body: TasksResponse = ensure_success(response).await?.json().await?;
        Ok(body.tasks)
    }

    async fn sync_emails(&self, token: &str) -> ClientResult<String> {
        let response = self
            .client
            .post(endpoint(&self.base_url, SYNC_PATH))
            .header(header::AUTHORIZATION, bearer(token))
            .send()
            .await?;

        Ok(ensure_success(response).await?.text().await?)
    }
}

/// Turn a non-2xx response into [`ClientError::Status`], keeping the body
/// text verbatim.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{RawQuery, State},
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Form, Json, Router,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    const TOKEN: &str = "tok-123";

    #[derive(Clone, Default)]
    struct Seen {
        queries: Arc<Mutex<Vec<String>>>,
        auth: Arc<Mutex<Vec<String>>>,
    }

    fn record_auth(seen: &Seen, headers: &HeaderMap) -> bool {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let ok = value == format!("Bearer {}", TOKEN);
        seen.auth.lock().unwrap().push(value);
        ok
    }

    async fn token(Form(form): Form<LoginRequest>) -> impl IntoResponse {
        if form.username == "admin" && form.password == "p@ss word" {
            Json(TokenResponse {
                access_token: TOKEN.to_string(),
                token_type: "bearer".to_string(),
            })
            .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, "Incorrect username or password").into_response()
        }
    }

    async fn emails(
        State(seen): State<Seen>,
        RawQuery(query): RawQuery,
        headers: HeaderMap,
    ) -> impl IntoResponse {
        seen.queries.lock().unwrap().push(query.unwrap_or_default());
        if !record_auth(&seen, &headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(vec![Email {
            id: 1,
            subject: "Quarterly numbers".to_string(),
            sender: "cfo@example.com".to_string(),
            recipient: "me@example.com".to_string(),
            body: "See attached".to_string(),
            date: Utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap(),
            raw_json: None,
        }])
        .into_response()
    }

    async fn tasks(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
        if !record_auth(&seen, &headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(fake_tasks()).into_response()
    }

    fn fake_tasks() -> TasksResponse {
        TasksResponse {
            tasks: vec![Task {
                id: Some(4),
                description: "Review budget".to_string(),
                assignee: "Sam".to_string(),
                deadline: None,
                priority: Some(2),
                category: Some("Action Item".to_string()),
                status: Some("pending".to_string()),
            }],
        }
    }

    async fn sync(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
        record_auth(&seen, &headers);
        (StatusCode::INTERNAL_SERVER_ERROR, "Graph token expired")
    }

    async fn spawn_fake_service() -> (String, Seen) {
        let seen = Seen::default();
        let router = Router::new()
            .route("/token", post(token))
            .route("/emails/", get(emails))
            .route("/extract-tasks/", get(tasks))
            .route("/sync-emails/", post(sync))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    #[tokio::test]
    async fn test_login_posts_form_credentials() {
        let (base_url, _) = spawn_fake_service().await;
        let api = HttpMailApi::new(base_url);

        let token = api
            .login(&LoginRequest::new("admin", "p@ss word"))
            .await
            .unwrap();
        assert_eq!(token.access_token, TOKEN);
    }

    #[tokio::test]
    async fn test_login_rejection_is_status_error() {
        let (base_url, _) = spawn_fake_service().await;
        let api = HttpMailApi::new(base_url);

        let err = api
            .login(&LoginRequest::new("admin", "wrong"))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "Incorrect username or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_emails_sends_encoded_filter_and_bearer() {
        let (base_url, seen) = spawn_fake_service().await;
        let api = HttpMailApi::new(format!("{}/", base_url));

        let filter = EmailFilter {
            search_term: "budget & plan".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            end_date: None,
        };
        let emails = api.fetch_emails(TOKEN, &filter).await.unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].subject, "Quarterly numbers");

        assert_eq!(
            seen.queries.lock().unwrap().as_slice(),
            ["search=budget%20%26%20plan&start_date=2025-02-01T00:00:00.000Z&end_date="]
        );
        assert_eq!(seen.auth.lock().unwrap().as_slice(), ["Bearer tok-123"]);
    }

    #[tokio::test]
    async fn test_fetch_tasks_unwraps_envelope() {
        let (base_url, _) = spawn_fake_service().await;
        let api = HttpMailApi::new(base_url);

        let tasks = api.fetch_tasks(TOKEN).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].assignee, "Sam");
    }

    #[tokio::test]
    async fn test_rejected_token_surfaces_as_status() {
        let (base_url, _) = spawn_fake_service().await;
        let api = HttpMailApi::new(base_url);

        let err = api.fetch_tasks("stale").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Status { status, .. } if status.as_u16() == 401
        ));
    }

    #[tokio::test]
    async fn test_sync_failure_keeps_raw_body() {
        let (base_url, _) = spawn_fake_service().await;
        let api = HttpMailApi::new(base_url);

        let err = api.sync_emails(TOKEN).await.unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "Graph token expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
