//! Unit tests for Auth crate
//! Handlers are driven through the real router over an in-memory repository.

#[cfg(test)]
pub(crate) mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::application::config::AuthConfig;
    use crate::application::{CreateUserInput, CreateUserUseCase};
    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{UserId, email::Email};
    use crate::error::{AuthError, AuthResult};
    use crate::presentation::router::auth_router_generic;

    pub const EMAIL: &str = "test@test.fr";
    pub const PASSWORD: &str = "Str0ng-Passw0rd!";

    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<HashMap<Uuid, User>>>,
    }

    impl InMemoryUserRepository {
        fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, User>> {
            self.users.lock().unwrap()
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &User) -> AuthResult<()> {
            let mut users = self.lock();
            if users.values().any(|u| u.email == user.email) {
                return Err(AuthError::EmailTaken);
            }
            users.insert(user.user_id.into_uuid(), user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            Ok(self.lock().get(user_id.as_uuid()).cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            Ok(self.lock().values().find(|u| &u.email == email).cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self.lock().values().any(|u| &u.email == email))
        }

        async fn update(&self, user: &User) -> AuthResult<()> {
            self.lock().insert(user.user_id.into_uuid(), user.clone());
            Ok(())
        }

        async fn list(&self) -> AuthResult<Vec<User>> {
            Ok(self.lock().values().cloned().collect())
        }

        async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
            Ok(self.lock().remove(user_id.as_uuid()).is_some())
        }
    }

    pub fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: b"test-secret-for-auth-handlers".to_vec(),
            cookie_secure: false,
            ..AuthConfig::default()
        }
    }

    pub async fn create_user(
        repo: &InMemoryUserRepository,
        email: &str,
        firstname: &str,
        lastname: &str,
    ) -> User {
        CreateUserUseCase::new(Arc::new(repo.clone()), Arc::new(test_config()))
            .execute(CreateUserInput {
                email: email.to_string(),
                firstname: firstname.to_string(),
                lastname: lastname.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
    }

    /// Repository holding the default test user
    pub async fn seeded() -> (InMemoryUserRepository, User) {
        let repo = InMemoryUserRepository::default();
        let user = create_user(&repo, EMAIL, "Admin", "User").await;
        (repo, user)
    }

    pub fn app(repo: &InMemoryUserRepository) -> Router {
        auth_router_generic(repo.clone(), test_config())
    }

    pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn cookie_request(method: &str, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("jwt={token}"))
            .body(Body::empty())
            .unwrap()
    }

    pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, serde_json::Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    /// Token value from a `Set-Cookie: jwt=...` header
    pub fn cookie_token(headers: &HeaderMap) -> String {
        let cookie = headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        let first = cookie.split(';').next().unwrap();
        first.strip_prefix("jwt=").unwrap().to_string()
    }

    pub async fn login_token(repo: &InMemoryUserRepository, email: &str, password: &str) -> String {
        let body = format!(r#"{{"email":"{email}","password":"{password}"}}"#);
        let (status, headers, _) = send(app(repo), json_request("POST", "/login", &body)).await;
        assert_eq!(status, StatusCode::OK);
        cookie_token(&headers)
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use crate::domain::entity::session::SessionClaims;
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn test_login_sets_verifiable_cookie() {
        let (repo, user) = seeded().await;

        let body = format!(r#"{{"email":"{EMAIL}","password":"{PASSWORD}"}}"#);
        let (status, headers, json) = send(app(&repo), json_request("POST", "/login", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["email"], EMAIL);
        assert_eq!(json["id"], user.user_id.to_string());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());

        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("jwt="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));

        let token = cookie_token(&headers);
        let claims: SessionClaims = test_config().jwt().verify(&token).unwrap();
        assert_eq!(claims.email, EMAIL);
        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.exp - claims.iat, 2_592_000);
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, "TEST@Test.FR", PASSWORD).await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let (repo, _) = seeded().await;

        let wrong_password = format!(r#"{{"email":"{EMAIL}","password":"Wrong-Passw0rd!"}}"#);
        let (status_a, headers_a, body_a) =
            send(app(&repo), json_request("POST", "/login", &wrong_password)).await;

        let unknown_email = format!(r#"{{"email":"nobody@test.fr","password":"{PASSWORD}"}}"#);
        let (status_b, _, body_b) =
            send(app(&repo), json_request("POST", "/login", &unknown_email)).await;

        assert_eq!(status_a, StatusCode::UNAUTHORIZED);
        assert_eq!(status_b, StatusCode::UNAUTHORIZED);
        assert_eq!(body_a["detail"], "Invalid credentials");
        assert_eq!(body_a, body_b);
        assert!(headers_a.get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_schema_violations() {
        let (repo, _) = seeded().await;

        let (status, _, body) = send(
            app(&repo),
            json_request("POST", "/login", r#"{"email":"not-an-email","password":"short"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["properties"]["email"]["errors"][0].is_string());
        assert!(body["errors"]["properties"]["password"]["errors"][0].is_string());

        let (status, _, body) = send(
            app(&repo),
            json_request(
                "POST",
                "/login",
                &format!(r#"{{"email":"{EMAIL}","password":"{PASSWORD}","role":"admin"}}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["properties"]["role"].is_object());

        let (status, _, body) = send(
            app(&repo),
            json_request("POST", "/login", &format!(r#"{{"email":"{EMAIL}"}}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["properties"]["password"]["errors"][0], "Required");
    }

    #[tokio::test]
    async fn test_login_malformed_json() {
        let (repo, _) = seeded().await;

        let (status, _, body) =
            send(app(&repo), json_request("POST", "/login", r#"{"email": "#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "You are not sending JSON data");
    }

    #[tokio::test]
    async fn test_login_wrong_content_type() {
        let (repo, _) = seeded().await;

        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(axum::body::Body::from("email=test@test.fr"))
            .unwrap();
        let (status, _, body) = send(app(&repo), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Expected Content-Type: application/json, but got: text/plain"
        );

        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/login")
            .body(axum::body::Body::from("{}"))
            .unwrap();
        let (status, _, body) = send(app(&repo), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Missing Content-Type header");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (repo, _) = seeded().await;

        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/logout")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, headers, _) = send(app(&repo), req).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("jwt=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

#[cfg(test)]
mod guard_tests {
    use super::support::*;
    use crate::domain::entity::session::SessionClaims;
    use crate::domain::repository::UserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;

    #[tokio::test]
    async fn test_missing_token() {
        let (repo, _) = seeded().await;

        let req = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(app(&repo), req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "No JWT token found");
    }

    #[tokio::test]
    async fn test_protected_refreshes_cookie() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let (status, headers, body) =
            send(app(&repo), cookie_request("GET", "/protected", &token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "message": "OK" }));
        let refreshed = cookie_token(&headers);
        assert!(
            test_config()
                .jwt()
                .verify::<SessionClaims>(&refreshed)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let req = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(app(&repo), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], EMAIL);
        assert_eq!(body["firstname"], "Admin");
    }

    #[tokio::test]
    async fn test_tampered_signature() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &signature[1..]);

        let (status, _, _) = send(app(&repo), cookie_request("GET", "/me", &tampered)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let (repo, user) = seeded().await;

        let mut other = test_config();
        other.jwt_secret = b"some-other-secret".to_vec();
        let claims = SessionClaims::issue(&user, other.token_ttl_chrono());
        let token = other.jwt().sign(&claims).unwrap();

        let (status, _, _) = send(app(&repo), cookie_request("GET", "/me", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (repo, user) = seeded().await;

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.user_id.into_uuid(),
            email: EMAIL.to_string(),
            iat: now - 3600,
            exp: now - 10,
        };
        let token = test_config().jwt().sign(&claims).unwrap();

        let (status, _, body) = send(app(&repo), cookie_request("GET", "/me", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Token expired");
    }

    #[tokio::test]
    async fn test_deleted_user_is_not_found() {
        let (repo, user) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        assert!(repo.delete(&user.user_id).await.unwrap());

        let (status, _, body) = send(app(&repo), cookie_request("GET", "/me", &token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_garbage_cookie() {
        let (repo, _) = seeded().await;
        let (status, _, _) =
            send(app(&repo), cookie_request("GET", "/protected", "not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod account_tests {
    use super::support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};

    fn change_password_request(token: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/me/password")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("jwt={token}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_change_password() {
        let (repo, user) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let body = format!(
            r#"{{"currentPassword":"{PASSWORD}","newPassword":"An0ther-Secret-Phrase"}}"#
        );
        let (status, headers, _) =
            send(app(&repo), change_password_request(&token, &body)).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(headers.get(header::SET_COOKIE).is_some());

        // old password no longer works, new one does
        let old = format!(r#"{{"email":"{EMAIL}","password":"{PASSWORD}"}}"#);
        let (status, _, _) = send(app(&repo), json_request("POST", "/login", &old)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        login_token(&repo, EMAIL, "An0ther-Secret-Phrase").await;

        let (_, _, me) = send(app(&repo), cookie_request("GET", "/me", &token)).await;
        let updated_at: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(me["updatedAt"].clone()).unwrap();
        assert!(updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let body = r#"{"currentPassword":"not-the-password","newPassword":"An0ther-Secret-Phrase"}"#;
        let (status, _, body) = send(app(&repo), change_password_request(&token, body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_change_password_weak_new() {
        let (repo, _) = seeded().await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let body = format!(r#"{{"currentPassword":"{PASSWORD}","newPassword":"1234567890"}}"#);
        let (status, _, body) = send(app(&repo), change_password_request(&token, &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["properties"]["newPassword"].is_object());
    }

    #[tokio::test]
    async fn test_list_users_sorted() {
        let (repo, _) = seeded().await;
        create_user(&repo, "zoe@test.fr", "Zoe", "Martin").await;
        create_user(&repo, "alice@test.fr", "Alice", "Martin").await;
        create_user(&repo, "bob@test.fr", "Bob", "dupont").await;
        let token = login_token(&repo, EMAIL, PASSWORD).await;

        let (status, _, body) = send(app(&repo), cookie_request("GET", "/app-users", &token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalDocs"], 4);
        let names: Vec<String> = body["docs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| format!("{} {}", u["firstname"].as_str().unwrap(), u["lastname"].as_str().unwrap()))
            .collect();
        assert_eq!(
            names,
            ["Bob dupont", "Alice Martin", "Zoe Martin", "Admin User"]
        );
        assert!(body["docs"][0].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_list_users_requires_auth() {
        let (repo, _) = seeded().await;
        let req = Request::builder()
            .uri("/app-users")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(app(&repo), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod seed_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{CreateUserInput, CreateUserUseCase, SeedOutcome, SeedUserUseCase};
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryUserRepository::default();
        let use_case = SeedUserUseCase::new(Arc::new(repo.clone()), Arc::new(test_config()));

        let first = use_case
            .execute(EMAIL, Some(PASSWORD.to_string()))
            .await
            .unwrap();
        assert!(matches!(first, SeedOutcome::Created(_)));

        let second = use_case
            .execute(EMAIL, Some(PASSWORD.to_string()))
            .await
            .unwrap();
        assert_eq!(second, SeedOutcome::AlreadyPresent);

        // the seeded account can log in
        login_token(&repo, EMAIL, PASSWORD).await;
    }

    #[tokio::test]
    async fn test_seed_without_password_is_skipped() {
        let repo = InMemoryUserRepository::default();
        let use_case = SeedUserUseCase::new(Arc::new(repo.clone()), Arc::new(test_config()));

        assert_eq!(
            use_case.execute(EMAIL, None).await.unwrap(),
            SeedOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let (repo, _) = seeded().await;

        let err = CreateUserUseCase::new(Arc::new(repo.clone()), Arc::new(test_config()))
            .execute(CreateUserInput {
                email: "Test@Test.fr".to_string(),
                firstname: "Other".to_string(),
                lastname: "Person".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_create_user_rejects_weak_password() {
        let repo = InMemoryUserRepository::default();

        let err = CreateUserUseCase::new(Arc::new(repo), Arc::new(test_config()))
            .execute(CreateUserInput {
                email: EMAIL.to_string(),
                firstname: "Admin".to_string(),
                lastname: "User".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::error::app_error::AppError;
    use platform::jwt::TokenError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::EmailTaken, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (
                AuthError::Rejected(AppError::bad_request("nope")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::TokenExpired
        ));
        assert!(matches!(
            AuthError::from(TokenError::InvalidSignature),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            AuthError::from(TokenError::Malformed("x".into())),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            AuthError::from(TokenError::Signing("x".into())),
            AuthError::Internal(_)
        ));
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let app_err = AppError::from(AuthError::Internal("pool exploded".into()));
        assert!(!app_err.message().contains("pool"));
    }
}
