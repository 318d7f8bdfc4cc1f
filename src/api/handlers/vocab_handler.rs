//! Vocabulary handlers.
//!
//! All routes here sit behind the identity middleware, which resolves the
//! `X-Email` header to a [`User`] and stores it in the request extensions.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{UpdateWord, User, VocabWordResponse};
use crate::errors::AppResult;

/// Request to save a new word
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddWordRequest {
    /// The word to save (must be non-blank)
    #[schema(example = "serendipity")]
    pub word: String,
    /// Optional meaning text
    #[validate(length(max = 1000, message = "Meaning must be at most 1000 characters"))]
    pub meaning: Option<String>,
    /// Optional example sentence
    #[validate(length(max = 1000, message = "Example must be at most 1000 characters"))]
    pub example: Option<String>,
}

/// Partial update request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PatchWordRequest {
    /// New value of the known flag
    pub known: Option<bool>,
    /// New meaning text (an empty string is applied as-is)
    #[validate(length(max = 1000, message = "Meaning must be at most 1000 characters"))]
    pub meaning: Option<String>,
    /// New example sentence (an empty string is applied as-is)
    #[validate(length(max = 1000, message = "Example must be at most 1000 characters"))]
    pub example: Option<String>,
}

impl From<PatchWordRequest> for UpdateWord {
    fn from(req: PatchWordRequest) -> Self {
        UpdateWord {
            known: req.known,
            meaning: req.meaning,
            example: req.example,
        }
    }
}

/// Create vocabulary routes
pub fn vocab_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words).post(add_word))
        .route("/:id", patch(patch_word).delete(delete_word))
}

/// List the caller's words, most recent first
#[utoipa::path(
    get,
    path = "/vocab",
    tag = "Vocabulary",
    security(("email_header" = [])),
    responses(
        (status = 200, description = "Words owned by the caller", body = Vec<VocabWordResponse>),
        (status = 401, description = "Missing X-Email header")
    )
)]
pub async fn list_words(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VocabWordResponse>>> {
    let words = state.vocab_service.list(&user).await?;

    Ok(Json(words.into_iter().map(VocabWordResponse::from).collect()))
}

/// Save a new word
#[utoipa::path(
    post,
    path = "/vocab",
    tag = "Vocabulary",
    security(("email_header" = [])),
    request_body = AddWordRequest,
    responses(
        (status = 201, description = "Word created", body = VocabWordResponse),
        (status = 400, description = "Word blank or payload invalid"),
        (status = 401, description = "Missing X-Email header"),
        (status = 409, description = "Word already saved")
    )
)]
pub async fn add_word(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddWordRequest>,
) -> AppResult<(StatusCode, Json<VocabWordResponse>)> {
    let word = state
        .vocab_service
        .add(&user, payload.word, payload.meaning, payload.example)
        .await?;

    Ok((StatusCode::CREATED, Json(VocabWordResponse::from(word))))
}

/// Update fields of a saved word
#[utoipa::path(
    patch,
    path = "/vocab/{id}",
    tag = "Vocabulary",
    security(("email_header" = [])),
    params(
        ("id" = Uuid, Path, description = "Word ID")
    ),
    request_body = PatchWordRequest,
    responses(
        (status = 200, description = "Word updated", body = VocabWordResponse),
        (status = 401, description = "Missing X-Email header"),
        (status = 403, description = "Word owned by another user"),
        (status = 404, description = "Word not found")
    )
)]
pub async fn patch_word(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PatchWordRequest>,
) -> AppResult<Json<VocabWordResponse>> {
    let word = state
        .vocab_service
        .patch(&user, id, payload.into())
        .await?;

    Ok(Json(VocabWordResponse::from(word)))
}

/// Delete a saved word
#[utoipa::path(
    delete,
    path = "/vocab/{id}",
    tag = "Vocabulary",
    security(("email_header" = [])),
    params(
        ("id" = Uuid, Path, description = "Word ID")
    ),
    responses(
        (status = 204, description = "Word deleted"),
        (status = 401, description = "Missing X-Email header"),
        (status = 403, description = "Word owned by another user"),
        (status = 404, description = "Word not found")
    )
)]
pub async fn delete_word(
    Extension(user): Extension<User>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.vocab_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
