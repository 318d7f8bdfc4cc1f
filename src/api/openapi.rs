//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, vocab_handler};
use crate::domain::VocabWordResponse;

/// OpenAPI documentation for the Vocab API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vocab API",
        version = "0.1.0",
        description = "Personal vocabulary tracking API with email-based identity",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::signup,
        auth_handler::login,
        // Vocabulary endpoints
        vocab_handler::list_words,
        vocab_handler::add_word,
        vocab_handler::patch_word,
        vocab_handler::delete_word,
    ),
    components(
        schemas(
            // Auth types
            auth_handler::SignupRequest,
            auth_handler::SignupResponse,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            // Vocabulary types
            VocabWordResponse,
            vocab_handler::AddWordRequest,
            vocab_handler::PatchWordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User signup and login verification"),
        (name = "Vocabulary", description = "Per-user vocabulary word management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the plaintext email header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "email_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-Email",
                    "Caller email; a user record is created on first contact",
                ))),
            );
        }
    }
}
