use argon2::Argon2;
use argon2::PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{User, token::TokenKey},
    schema::users,
    state::Conn,
    util_resp::{FailureResponse, StandardResponse, bad_request, conflict, created},
    validation::is_valid_email,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub full_name: String,
}

pub async fn do_register(
    State(key): State<TokenKey>,
    mut conn: Conn,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> StandardResponse {
    let Json(body) = body
        .map_err(|e| FailureResponse::BadRequest(e.body_text()))?;

    let (Some(full_name), Some(email), Some(password)) =
        (body.full_name, body.email, body.password)
    else {
        return bad_request("Missing required fields");
    };

    if let Err(e) = is_valid_email(&email) {
        return bad_request(e);
    }

    let existing = users::table
        .filter(users::email.eq(&email))
        .first::<User>(&mut *conn)
        .optional()
        .map_err(FailureResponse::from)?;

    if existing.is_some() {
        return conflict("Email already in use");
    }

    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            FailureResponse::ServerError(())
        })?
        .to_string();

    let user = User {
        id: Uuid::now_v7().to_string(),
        full_name,
        email,
        password_hash,
        role: "USER".to_string(),
        created_at: Utc::now().naive_utc(),
    };

    insert_into(users::table)
        .values(&user)
        .execute(&mut *conn)
        .map_err(FailureResponse::from)?;

    created(&AuthResponse {
        token: key.sign(&user.email),
        email: user.email,
        full_name: user.full_name,
    })
}
