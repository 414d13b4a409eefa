use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use diesel::prelude::*;
use serde::Deserialize;

use crate::{
    auth::{User, register::AuthResponse, token::TokenKey},
    schema::users,
    state::Conn,
    util_resp::{FailureResponse, StandardResponse, success, unauthorized},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn do_login(
    State(key): State<TokenKey>,
    mut conn: Conn,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> StandardResponse {
    let Json(body) = body
        .map_err(|e| FailureResponse::BadRequest(e.body_text()))?;

    let (Some(email), Some(password)) = (body.email, body.password) else {
        return unauthorized("Invalid credentials");
    };

    let user = match users::table
        .filter(users::email.eq(&email))
        .first::<User>(&mut *conn)
        .optional()
        .map_err(FailureResponse::from)?
    {
        Some(user) => user,
        None => return unauthorized("Invalid credentials"),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
        tracing::error!(error = %e, "stored password hash is malformed");
        FailureResponse::ServerError(())
    })?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        // todo: password rate limiting
        return unauthorized("Invalid credentials");
    }

    success(&AuthResponse {
        token: key.sign(&user.email),
        email: user.email,
        full_name: user.full_name,
    })
}
