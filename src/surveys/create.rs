use axum::{Json, extract::rejection::JsonRejection};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::User,
    schema::survey_entries,
    state::Conn,
    surveys::{SurveyEntry, ensure_json_array},
    util_resp::{FailureResponse, StandardResponse, success},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions_json: Option<String>,
    pub responses_json: Option<String>,
    pub creator_email: Option<String>,
    pub status: Option<String>,
}

pub async fn create_survey(
    user: Option<User>,
    mut conn: Conn,
    body: Result<Json<CreateSurveyBody>, JsonRejection>,
) -> StandardResponse {
    let Json(body) = body
        .map_err(|e| FailureResponse::BadRequest(e.body_text()))?;

    let questions_json =
        body.questions_json.unwrap_or_else(|| "[]".to_string());
    ensure_json_array(&questions_json, "questionsJson")?;

    if let Some(user) = &user {
        tracing::debug!(principal = %user.email, "authenticated survey creation");
    }

    let entry = SurveyEntry {
        id: Uuid::now_v7().to_string(),
        title: body.title.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
        questions_json,
        responses_json: body
            .responses_json
            .unwrap_or_else(|| "[]".to_string()),
        creator_email: body.creator_email,
        status: body.status.unwrap_or_else(|| "ACTIVE".to_string()),
        created_at: Utc::now().naive_utc(),
    };

    diesel::insert_into(survey_entries::table)
        .values(&entry)
        .execute(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&entry)
}
