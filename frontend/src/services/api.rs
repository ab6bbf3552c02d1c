use gloo_net::http::{Request, Response};
use shared::api::{
    bearer, emails_url, endpoint, LoginRequest, TasksResponse, TokenResponse, SYNC_PATH,
    TASKS_PATH, TOKEN_PATH,
};
use shared::models::{Email, EmailFilter, Task};
use shared::state::{sync_failed_message, FETCH_EMAILS_FAILED_MESSAGE};

const API_BASE_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Calls to the mail service. Errors come back as the text to display.
pub struct ApiService;

impl ApiService {
    pub async fn login(request: &LoginRequest) -> Result<TokenResponse, String> {
        let response = Request::post(&endpoint(API_BASE_URL, TOKEN_PATH))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(request.form_body())
            .map_err(|e| format!("Failed to build request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        parse(response).await
    }

    pub async fn fetch_emails(token: &str, filter: &EmailFilter) -> Result<Vec<Email>, String> {
        let response = Request::get(&emails_url(API_BASE_URL, filter))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(FETCH_EMAILS_FAILED_MESSAGE.to_string());
        }

        parse(response).await
    }

    pub async fn fetch_tasks(token: &str) -> Result<Vec<Task>, String> {
        let response = Request::get(&endpoint(API_BASE_URL, TASKS_PATH))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let body: TasksResponse = parse(response).await?;
        Ok(body.tasks)
    }

    /// Returns the raw success body. A rejected sync carries the service's
    /// response body in the error.
    pub async fn sync_emails(token: &str) -> Result<String, String> {
        let response = Request::post(&endpoint(API_BASE_URL, SYNC_PATH))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {:?}", e))?;

        if !response.ok() {
            return Err(sync_failed_message(&body));
        }
        Ok(body)
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {:?}", e))
}
