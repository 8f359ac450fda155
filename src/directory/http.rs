use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use tracing::{debug, instrument};

use crate::domain::{Credentials, LoginResponse, SessionToken, UserDraft, UserId, UserPage};
use crate::error::DirectoryError;

const API_KEY_HEADER: &str = "x-api-key";

/// REST backend for the directory.
///
/// Any non-2xx status is an error; the body of an update response is
/// ignored.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

impl HttpDirectory {
    /// Builds a backend rooted at `base_url` (e.g. `https://reqres.in/api`).
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self, DirectoryError> {
        Self::from_builder(Client::builder(), base_url, api_key)
    }

    /// Like [`HttpDirectory::new`], starting from a caller-tuned client builder.
    pub fn from_builder(
        builder: ClientBuilder,
        base_url: impl Into<String>,
        api_key: Option<&str>,
    ) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| DirectoryError::Http(format!("invalid api key: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = builder
            .default_headers(headers)
            .build()
            .map_err(|e| DirectoryError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[instrument(skip(self))]
    pub async fn fetch_page(&self, page: u32) -> Result<UserPage, DirectoryError> {
        let response = self
            .client
            .get(self.url("users"))
            .query(&[("page", page)])
            .send()
            .await?;
        let page: UserPage = check_status(response).await?.json().await?;
        debug!(users = page.data.len(), total_pages = page.total_pages, "Fetched page");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<(), DirectoryError> {
        let response = self
            .client
            .put(self.url(&format!("users/{id}")))
            .json(draft)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), DirectoryError> {
        let response = self
            .client
            .delete(self.url(&format!("users/{id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, DirectoryError> {
        let response = self
            .client
            .post(self.url("login"))
            .json(credentials)
            .send()
            .await?;
        let body: LoginResponse = check_status(response).await?.json().await?;
        Ok(body.token)
    }
}

async fn check_status(response: Response) -> Result<Response, DirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(DirectoryError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    async fn list_users(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if headers.get("x-api-key").map(|v| v.as_bytes()) != Some(b"test-key".as_slice()) {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        Ok(Json(json!({
            "page": page,
            "per_page": 1,
            "total": 2,
            "total_pages": 2,
            "data": [{
                "id": page,
                "email": format!("user{page}@reqres.in"),
                "first_name": "First",
                "last_name": "Last",
                "avatar": "https://reqres.in/img/faces/1-image.jpg"
            }]
        })))
    }

    async fn update_user(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "id": id, "first_name": body["first_name"], "updatedAt": "now" }))
    }

    async fn delete_user(Path(id): Path<u64>) -> StatusCode {
        if id == 99 {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
        if body.get("password").and_then(Value::as_str).unwrap_or_default().is_empty() {
            return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": "Missing password" }))));
        }
        Ok(Json(json!({ "token": "QpwL5tke4Pnpja7X4" })))
    }

    async fn spawn_directory() -> String {
        let app = Router::new()
            .route("/api/users", get(list_users))
            .route("/api/users/:id", put(update_user).delete(delete_user))
            .route("/api/login", post(login));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/")
    }

    fn local(base: impl Into<String>, api_key: Option<&str>) -> HttpDirectory {
        HttpDirectory::from_builder(Client::builder().no_proxy(), base, api_key).unwrap()
    }

    #[tokio::test]
    async fn fetches_requested_page_with_api_key() {
        let base = spawn_directory().await;
        let directory = local(base, Some("test-key"));

        let page = directory.fetch_page(2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].email, "user2@reqres.in");
    }

    #[tokio::test]
    async fn missing_api_key_is_a_status_error() {
        let base = spawn_directory().await;
        let directory = local(base, None);

        let err = directory.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let base = spawn_directory().await;
        let directory = local(base, Some("test-key"));

        let draft = UserDraft::new("Jan", "Weaver", "jan@reqres.in");
        directory.update_user(2, &draft).await.unwrap();
        directory.delete_user(2).await.unwrap();

        let err = directory.delete_user(99).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn login_returns_token_or_error() {
        let base = spawn_directory().await;
        let directory = local(base, None);

        let token = directory
            .login(&Credentials {
                email: "eve.holt@reqres.in".into(),
                password: "cityslicka".into(),
            })
            .await
            .unwrap();
        assert_eq!(token.as_str(), "QpwL5tke4Pnpja7X4");

        let err = directory
            .login(&Credentials {
                email: "eve.holt@reqres.in".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        match err {
            DirectoryError::Status { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("Missing password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_directory_is_an_http_error() {
        let directory = local("http://127.0.0.1:1/api", None);
        let err = directory.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Http(_)));
    }
}
