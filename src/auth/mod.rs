use axum::{
    Json, async_trait,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::json;

use crate::{
    auth::token::TokenKey,
    schema::users,
    state::DbPool,
};

pub mod login;
pub mod register;
pub mod token;

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub enum AuthError {
    HeaderMissingOrMalformed,
    NoDatabase,
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::HeaderMissingOrMalformed => (
                StatusCode::UNAUTHORIZED,
                "Authorization header missing or malformed",
            ),
            AuthError::NoDatabase => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AuthError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Extracts the requesting user from a `Authorization: Bearer <token>`
/// header. No endpoint requires this; handlers that want to know the
/// principal take an `Option<User>`.
#[async_trait]
impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
    DbPool: FromRef<S>,
    TokenKey: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::HeaderMissingOrMalformed)?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::HeaderMissingOrMalformed)?;

        let email = TokenKey::from_ref(state)
            .verify(token)
            .ok_or(AuthError::Unauthorized)?;

        let pool = DbPool::from_ref(state);
        let mut conn = tokio::task::spawn_blocking(move || pool.get())
            .await
            .map_err(|_| AuthError::NoDatabase)?
            .map_err(|_| AuthError::NoDatabase)?;

        let user = users::table
            .filter(users::email.eq(&email))
            .first::<User>(&mut conn)
            .optional()
            .map_err(|_| AuthError::NoDatabase)?;

        match user {
            Some(user) => Ok(user),
            None => Err(AuthError::Unauthorized),
        }
    }
}
