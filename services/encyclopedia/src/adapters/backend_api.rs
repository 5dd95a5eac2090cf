//! services/encyclopedia/src/adapters/backend_api.rs
//!
//! This module contains the adapter for the application backend (accounts,
//! favorites, user administration). It implements the `BackendService` port
//! from the `core` crate.
//!
//! Every non-2xx response is reported with the same coarse message; the
//! backend's error details are not inspected.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hadith_core::domain::{
    AuthSession, FavoriteRef, Favorites, NewUser, Registration, Role, User, UserUpdate,
};
use hadith_core::ports::{BackendService, PortError, PortResult, TokenStore};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `BackendService` over the backend's JSON API.
#[derive(Clone)]
pub struct BackendApiAdapter {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl BackendApiAdapter {
    /// Creates a new `BackendApiAdapter` reading the bearer token from `tokens`.
    pub fn new(client: Client, base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            tokens,
        }
    }

    /// Builds a request, attaching the stored bearer token when there is one.
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, endpoint));
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and fails with `failure` on transport errors or non-2xx.
    async fn send(&self, builder: RequestBuilder, failure: impl Fn(&Response) -> String) -> PortResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if !response.status().is_success() {
            debug!("Backend responded with {}", response.status());
            return Err(PortError::Unexpected(failure(&response)));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> PortResult<T> {
        let response = self.send(builder, api_failure).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn send_ignoring_body(&self, builder: RequestBuilder) -> PortResult<()> {
        self.send(builder, api_failure).await.map(|_| ())
    }
}

fn api_failure(response: &Response) -> String {
    format!(
        "API request failed: {}",
        response.status().canonical_reason().unwrap_or("Unknown")
    )
}

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Deserialize)]
struct UserRecord {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    email: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            username: self.name.or(self.username).unwrap_or_default(),
            email: self.email,
            password_hash: self.password.unwrap_or_default(),
            favorites: Favorites::default(),
            role: self.role.as_deref().map(Role::parse).unwrap_or_default(),
            created_at: self
                .created_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Deserialize)]
struct AuthRecord {
    user: UserRecord,
    token: String,
}
impl AuthRecord {
    fn to_domain(self) -> AuthSession {
        AuthSession {
            user: self.user.to_domain(),
            token: self.token,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct FavoriteRecord {
    hadith_id: String,
    book_id: String,
    hadith_number: u32,
}
impl FavoriteRecord {
    fn to_domain(self) -> FavoriteRef {
        FavoriteRef {
            hadith_id: self.hadith_id,
            book_id: self.book_id,
            hadith_number: self.hadith_number,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
}

#[derive(Serialize)]
struct UserRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
}

//=========================================================================================
// `BackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendService for BackendApiAdapter {
    async fn login(&self, email: &str, password: &str) -> PortResult<AuthSession> {
        let builder = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, password });
        let response = self.send(builder, |_| "Login failed".to_string()).await?;
        let record: AuthRecord = response
            .json()
            .await
            .map_err(|_| PortError::Unexpected("Login failed".to_string()))?;
        Ok(record.to_domain())
    }

    async fn register(&self, registration: &Registration) -> PortResult<AuthSession> {
        let builder = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&RegisterRequest {
                name: &registration.username,
                email: &registration.email,
                password: &registration.password,
                password_confirmation: &registration.password_confirmation,
            });
        let response = self
            .send(builder, |_| "Registration failed".to_string())
            .await?;
        let record: AuthRecord = response
            .json()
            .await
            .map_err(|_| PortError::Unexpected("Registration failed".to_string()))?;
        Ok(record.to_domain())
    }

    async fn logout(&self) -> PortResult<()> {
        self.send_ignoring_body(self.request(Method::POST, "/logout"))
            .await
    }

    async fn current_user(&self) -> PortResult<User> {
        let record: UserRecord = self.send_json(self.request(Method::GET, "/user")).await?;
        Ok(record.to_domain())
    }

    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRef>> {
        let records: Vec<FavoriteRecord> =
            self.send_json(self.request(Method::GET, "/favorites")).await?;
        Ok(records.into_iter().map(FavoriteRecord::to_domain).collect())
    }

    async fn add_favorite(&self, favorite: &FavoriteRef) -> PortResult<()> {
        let body = FavoriteRecord {
            hadith_id: favorite.hadith_id.clone(),
            book_id: favorite.book_id.clone(),
            hadith_number: favorite.hadith_number,
        };
        self.send_ignoring_body(self.request(Method::POST, "/favorites").json(&body))
            .await
    }

    async fn remove_favorite(&self, hadith_id: &str) -> PortResult<()> {
        let endpoint = format!("/favorites/{}", hadith_id);
        self.send_ignoring_body(self.request(Method::DELETE, &endpoint))
            .await
    }

    async fn list_users(&self) -> PortResult<Vec<User>> {
        let records: Vec<UserRecord> =
            self.send_json(self.request(Method::GET, "/admin/users")).await?;
        Ok(records.into_iter().map(UserRecord::to_domain).collect())
    }

    async fn create_user(&self, user: &NewUser) -> PortResult<User> {
        let body = UserRequest {
            name: Some(&user.username),
            email: Some(&user.email),
            password: Some(&user.password),
            role: Some(user.role.as_str()),
        };
        let record: UserRecord = self
            .send_json(self.request(Method::POST, "/admin/users").json(&body))
            .await?;
        Ok(record.to_domain())
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> PortResult<()> {
        let body = UserRequest {
            name: update.username.as_deref().filter(|v| !v.is_empty()),
            email: update.email.as_deref().filter(|v| !v.is_empty()),
            password: update.password.as_deref().filter(|v| !v.is_empty()),
            role: update.role.map(|role| role.as_str()),
        };
        let endpoint = format!("/admin/users/{}", user_id);
        self.send_ignoring_body(self.request(Method::PUT, &endpoint).json(&body))
            .await
    }

    async fn delete_user(&self, user_id: i64) -> PortResult<()> {
        let endpoint = format!("/admin/users/{}", user_id);
        self.send_ignoring_body(self.request(Method::DELETE, &endpoint))
            .await
    }

    async fn export_users_csv(&self) -> PortResult<String> {
        let response = self
            .send(self.request(Method::GET, "/admin/users/export"), |_| {
                "Failed to export users".to_string()
            })
            .await?;
        response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::token_store::MemoryTokenStore;
    use httpmock::prelude::*;
    use httpmock::MockServer;
    use serde_json::json;

    fn adapter(server: &MockServer, token: Option<&str>) -> BackendApiAdapter {
        let tokens: Arc<dyn TokenStore> = match token {
            Some(token) => Arc::new(MemoryTokenStore::with_token(token)),
            None => Arc::new(MemoryTokenStore::default()),
        };
        BackendApiAdapter::new(Client::new(), server.url("/api"), tokens)
    }

    #[tokio::test]
    async fn login_maps_name_to_username_and_returns_the_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/login")
                    .json_body(json!({ "email": "a@b.id", "password": "rahasia" }));
                then.status(200).json_body(json!({
                    "user": {
                        "id": 4,
                        "name": "Budi",
                        "email": "a@b.id",
                        "role": "admin",
                        "created_at": "2024-05-01T08:30:00.000000Z"
                    },
                    "token": "tok-1"
                }));
            })
            .await;

        let session = adapter(&server, None).login("a@b.id", "rahasia").await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.username, "Budi");
        assert!(session.user.is_admin());
        assert!(session.user.created_at.is_some());
    }

    #[tokio::test]
    async fn login_failure_is_generic() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/login");
                then.status(401).json_body(json!({ "message": "Invalid credentials" }));
            })
            .await;

        let err = adapter(&server, None).login("a@b.id", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "An unexpected error occurred: Login failed");
    }

    #[tokio::test]
    async fn authenticated_calls_carry_the_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/favorites")
                    .header("authorization", "Bearer tok-9");
                then.status(200).json_body(json!([
                    { "hadith_id": "bukhari-1", "book_id": "bukhari", "hadith_number": 1 }
                ]));
            })
            .await;

        let favorites = adapter(&server, Some("tok-9")).list_favorites().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            favorites,
            vec![FavoriteRef {
                hadith_id: "bukhari-1".to_string(),
                book_id: "bukhari".to_string(),
                hadith_number: 1,
            }]
        );
    }

    #[tokio::test]
    async fn missing_token_omits_the_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/user").header_missing("authorization");
                then.status(401);
            })
            .await;

        let err = adapter(&server, None).current_user().await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.to_string(), "An unexpected error occurred: API request failed: Unauthorized");
    }

    #[tokio::test]
    async fn update_only_sends_the_fields_that_changed() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/admin/users/7")
                    .json_body(json!({ "name": "Siti", "role": "user" }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let update = UserUpdate {
            username: Some("Siti".to_string()),
            password: Some(String::new()),
            role: Some(Role::User),
            ..Default::default()
        };
        adapter(&server, Some("t")).update_user(7, &update).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn remove_favorite_targets_the_hadith_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/favorites/muslim-12");
                then.status(204);
            })
            .await;

        adapter(&server, Some("t"))
            .remove_favorite("muslim-12")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn export_returns_the_csv_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/users/export");
                then.status(200)
                    .header("content-type", "text/csv")
                    .body("id,name\n1,Budi\n");
            })
            .await;

        let csv = adapter(&server, Some("t")).export_users_csv().await.unwrap();
        assert_eq!(csv, "id,name\n1,Budi\n");
    }
}
