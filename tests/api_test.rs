//! Integration tests for API endpoints.
//!
//! These tests drive the real router with stub services, so they cover
//! routing, the identity middleware, request validation, and error-to-status
//! mapping without requiring a database connection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use chrono::Utc;
use tower::util::ServiceExt;
use uuid::Uuid;

use vocab_api::api::create_router;
use vocab_api::domain::{UpdateWord, User, UserRole, VocabWord};
use vocab_api::errors::{AppError, AppResult};
use vocab_api::infra::Database;
use vocab_api::services::{AuthService, IdentityService, VocabService};
use vocab_api::AppState;

// =============================================================================
// Stub Services
// =============================================================================

fn test_user(id: Uuid) -> User {
    User {
        id,
        email: "caller@example.com".to_string(),
        username: Some("caller".to_string()),
        password_hash: "hashed".to_string(),
        role: UserRole::User,
        provider: "LOCAL".to_string(),
        enabled: true,
        created_at: Utc::now(),
    }
}

/// Identity stub that resolves every email to one fixed user
struct StubIdentityService {
    user: User,
}

#[async_trait]
impl IdentityService for StubIdentityService {
    async fn resolve(&self, _email: &str) -> AppResult<User> {
        Ok(self.user.clone())
    }

    async fn get_or_create(&self, _email: &str) -> AppResult<(User, bool)> {
        Ok((self.user.clone(), false))
    }
}

/// Auth stub: signup succeeds unless configured to conflict; login accepts
/// one fixed password
struct StubAuthService {
    conflict: bool,
}

#[async_trait]
impl AuthService for StubAuthService {
    async fn signup(
        &self,
        email: String,
        username: Option<String>,
        _password: String,
    ) -> AppResult<User> {
        if self.conflict {
            return Err(AppError::conflict("user"));
        }
        let mut user = test_user(Uuid::new_v4());
        user.email = email;
        user.username = username;
        Ok(user)
    }

    async fn login(&self, _email: String, password: String) -> AppResult<bool> {
        Ok(password == "right-password")
    }
}

/// In-memory vocabulary service mirroring the store semantics
struct InMemoryVocabService {
    words: Mutex<Vec<VocabWord>>,
}

impl InMemoryVocabService {
    fn new(seed: Vec<VocabWord>) -> Self {
        Self {
            words: Mutex::new(seed),
        }
    }
}

#[async_trait]
impl VocabService for InMemoryVocabService {
    async fn list(&self, user: &User) -> AppResult<Vec<VocabWord>> {
        Ok(self
            .words
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user.id)
            .cloned()
            .collect())
    }

    async fn add(
        &self,
        user: &User,
        word: String,
        meaning: Option<String>,
        example: Option<String>,
    ) -> AppResult<VocabWord> {
        let word = word.trim().to_string();
        if word.is_empty() {
            return Err(AppError::bad_request("word required"));
        }

        let mut words = self.words.lock().unwrap();
        if words
            .iter()
            .any(|w| w.user_id == user.id && w.word.eq_ignore_ascii_case(&word))
        {
            return Err(AppError::conflict("word"));
        }

        let created = VocabWord {
            id: Uuid::new_v4(),
            word,
            meaning,
            example,
            known: false,
            created_at: Utc::now(),
            user_id: user.id,
        };
        // Newest first, like the store's descending created_at ordering
        words.insert(0, created.clone());
        Ok(created)
    }

    async fn patch(&self, user: &User, id: Uuid, update: UpdateWord) -> AppResult<VocabWord> {
        let mut words = self.words.lock().unwrap();
        let word = words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(AppError::NotFound)?;

        if word.user_id != user.id {
            return Err(AppError::Forbidden);
        }

        if let Some(known) = update.known {
            word.known = known;
        }
        if let Some(meaning) = update.meaning {
            word.meaning = Some(meaning);
        }
        if let Some(example) = update.example {
            word.example = Some(example);
        }
        Ok(word.clone())
    }

    async fn delete(&self, user: &User, id: Uuid) -> AppResult<()> {
        let mut words = self.words.lock().unwrap();
        let idx = words
            .iter()
            .position(|w| w.id == id)
            .ok_or(AppError::NotFound)?;

        if words[idx].user_id != user.id {
            return Err(AppError::Forbidden);
        }

        words.remove(idx);
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn seed_word(user_id: Uuid, word: &str) -> VocabWord {
    VocabWord {
        id: Uuid::new_v4(),
        word: word.to_string(),
        meaning: Some("a meaning".to_string()),
        example: None,
        known: false,
        created_at: Utc::now(),
        user_id,
    }
}

/// Build a router over stub services; returns the caller the identity
/// middleware resolves every request to.
fn test_router(seed: Vec<VocabWord>, signup_conflict: bool) -> (Router, User) {
    let caller = test_user(Uuid::new_v4());

    let state = AppState::new(
        Arc::new(StubAuthService {
            conflict: signup_conflict,
        }),
        Arc::new(StubIdentityService {
            user: caller.clone(),
        }),
        Arc::new(InMemoryVocabService::new(seed)),
        Arc::new(Database::new(sea_orm::DatabaseConnection::default())),
    );

    (create_router(state), caller)
}

fn json_request(method: &str, uri: &str, email: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(email) = email {
        builder = builder.header("X-Email", email);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, email: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(email) = email {
        builder = builder.header("X-Email", email);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Vocabulary Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_vocab_requires_email_header() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .oneshot(empty_request("GET", "/vocab", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_words_returns_callers_words() {
    let caller = test_user(Uuid::new_v4());
    // One word for the resolved caller, one foreign word that must not leak
    let seed = vec![
        seed_word(caller.id, "serendipity"),
        seed_word(Uuid::new_v4(), "hidden"),
    ];
    let state = AppState::new(
        Arc::new(StubAuthService { conflict: false }),
        Arc::new(StubIdentityService {
            user: caller.clone(),
        }),
        Arc::new(InMemoryVocabService::new(seed)),
        Arc::new(Database::new(sea_orm::DatabaseConnection::default())),
    );
    let router = create_router(state);

    let response = router
        .oneshot(empty_request("GET", "/vocab", Some(&caller.email)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let words = body.as_array().unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0]["word"], "serendipity");
}

#[tokio::test]
async fn test_add_word_trims_and_creates() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/vocab",
            Some("caller@example.com"),
            &serde_json::json!({"word": "  cat  ", "meaning": "feline"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["word"], "cat");
    assert_eq!(body["meaning"], "feline");
    assert_eq!(body["known"], false);
}

#[tokio::test]
async fn test_add_blank_word_is_bad_request() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .oneshot(json_request(
            "POST",
            "/vocab",
            Some("caller@example.com"),
            &serde_json::json!({"word": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_duplicate_word_is_conflict_case_insensitive() {
    let caller = test_user(Uuid::new_v4());
    let seed = vec![seed_word(caller.id, "Cat")];
    let state = AppState::new(
        Arc::new(StubAuthService { conflict: false }),
        Arc::new(StubIdentityService {
            user: caller.clone(),
        }),
        Arc::new(InMemoryVocabService::new(seed)),
        Arc::new(Database::new(sea_orm::DatabaseConnection::default())),
    );
    let router = create_router(state);

    let response = router
        .oneshot(json_request(
            "POST",
            "/vocab",
            Some(&caller.email),
            &serde_json::json!({"word": "cat"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_patch_word_by_non_owner_is_forbidden() {
    let foreign = seed_word(Uuid::new_v4(), "cat");
    let foreign_id = foreign.id;
    let (router, _) = test_router(vec![foreign], false);

    let response = router
        .oneshot(json_request(
            "PATCH",
            &format!("/vocab/{}", foreign_id),
            Some("caller@example.com"),
            &serde_json::json!({"known": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_patch_unknown_word_is_not_found() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .oneshot(json_request(
            "PATCH",
            &format!("/vocab/{}", Uuid::new_v4()),
            Some("caller@example.com"),
            &serde_json::json!({"known": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_known_only_keeps_other_fields() {
    let caller = test_user(Uuid::new_v4());
    let word = seed_word(caller.id, "cat");
    let word_id = word.id;
    let state = AppState::new(
        Arc::new(StubAuthService { conflict: false }),
        Arc::new(StubIdentityService {
            user: caller.clone(),
        }),
        Arc::new(InMemoryVocabService::new(vec![word])),
        Arc::new(Database::new(sea_orm::DatabaseConnection::default())),
    );
    let router = create_router(state);

    let response = router
        .oneshot(json_request(
            "PATCH",
            &format!("/vocab/{}", word_id),
            Some(&caller.email),
            &serde_json::json!({"known": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["known"], true);
    assert_eq!(body["meaning"], "a meaning");
}

#[tokio::test]
async fn test_delete_word_returns_no_content() {
    let caller = test_user(Uuid::new_v4());
    let word = seed_word(caller.id, "cat");
    let word_id = word.id;
    let state = AppState::new(
        Arc::new(StubAuthService { conflict: false }),
        Arc::new(StubIdentityService {
            user: caller.clone(),
        }),
        Arc::new(InMemoryVocabService::new(vec![word])),
        Arc::new(Database::new(sea_orm::DatabaseConnection::default())),
    );
    let router = create_router(state);

    let response = router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/vocab/{}", word_id),
            Some(&caller.email),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The word is gone
    let response = router
        .oneshot(empty_request("GET", "/vocab", Some(&caller.email)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// =============================================================================
// Auth Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_signup_returns_created_user_summary() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            None,
            &serde_json::json!({
                "email": "new@example.com",
                "username": "newbie",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["email"], "new@example.com");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_signup_duplicate_is_conflict() {
    let (router, _) = test_router(vec![], true);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            None,
            &serde_json::json!({
                "email": "dup@example.com",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            None,
            &serde_json::json!({
                "email": "not-an-email",
                "password": "long-enough-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_reports_match_result() {
    let (router, _) = test_router(vec![], false);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            &serde_json::json!({"email": "a@example.com", "password": "right-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            &serde_json::json!({"email": "a@example.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], false);
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::conflict("word").into_response().status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::bad_request("word required").into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::provisioning("constraint violated")
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_provisioning_error_surfaces_cause() {
    let response = AppError::provisioning("users_username_key").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PROVISIONING_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("users_username_key"));
}
