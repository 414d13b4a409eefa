use axum::{
    Json,
    extract::{Path, rejection::JsonRejection},
};
use diesel::prelude::*;
use serde::Deserialize;

use crate::{
    auth::User,
    schema::survey_entries,
    state::Conn,
    surveys::{SurveyEntry, ensure_json_array},
    util_resp::{FailureResponse, StandardResponse, success},
};

/// Only these four fields are writable after creation; the creator and the
/// creation timestamp never change. Omitted fields take the same defaults
/// as at creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurveyBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions_json: Option<String>,
    pub status: Option<String>,
}

pub async fn update_survey(
    Path(id): Path<String>,
    user: Option<User>,
    mut conn: Conn,
    body: Result<Json<UpdateSurveyBody>, JsonRejection>,
) -> StandardResponse {
    let Json(body) = body
        .map_err(|e| FailureResponse::BadRequest(e.body_text()))?;

    let mut entry = SurveyEntry::fetch(&id, &mut *conn)?;

    let questions_json =
        body.questions_json.unwrap_or_else(|| "[]".to_string());
    ensure_json_array(&questions_json, "questionsJson")?;

    if let Some(user) = &user {
        tracing::debug!(principal = %user.email, survey = %id, "authenticated survey update");
    }

    entry.title = body.title.unwrap_or_default();
    entry.description = body.description.unwrap_or_default();
    entry.questions_json = questions_json;
    entry.status = body.status.unwrap_or_else(|| "ACTIVE".to_string());

    diesel::update(survey_entries::table.filter(survey_entries::id.eq(&id)))
        .set((
            survey_entries::title.eq(&entry.title),
            survey_entries::description.eq(&entry.description),
            survey_entries::questions_json.eq(&entry.questions_json),
            survey_entries::status.eq(&entry.status),
        ))
        .execute(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&entry)
}
