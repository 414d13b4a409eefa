use axum::{
    Json,
    extract::{Path, Query, rejection::JsonRejection},
};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{
    schema::survey_responses,
    state::Conn,
    surveys::pagination::{Page, PageParams, SortDirection},
    util_resp::{FailureResponse, StandardResponse, created, success},
};

#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = survey_responses)]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    pub answers_json: String,
    pub respondent_email: Option<String>,
    pub status: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseBody {
    pub answers_json: Option<String>,
    pub respondent_email: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum ResponseSortField {
    Id,
    SurveyId,
    RespondentEmail,
    Status,
    SubmittedAt,
}

impl ResponseSortField {
    pub fn parse(raw: &str) -> Result<Self, FailureResponse> {
        match raw {
            "id" => Ok(Self::Id),
            "surveyId" => Ok(Self::SurveyId),
            "respondentEmail" => Ok(Self::RespondentEmail),
            "status" => Ok(Self::Status),
            "submittedAt" => Ok(Self::SubmittedAt),
            _ => Err(FailureResponse::BadRequest(format!(
                "cannot sort responses by `{raw}`"
            ))),
        }
    }
}

/// Equality filters for response listings; substring matching is not part
/// of the response API.
#[derive(Debug, Default)]
pub struct ResponseFilter {
    pub survey_id: Option<String>,
    pub respondent_email: Option<String>,
}

fn filtered<'a>(
    filter: &'a ResponseFilter,
) -> survey_responses::BoxedQuery<'a, Sqlite> {
    let mut query = survey_responses::table.into_boxed();

    if let Some(survey_id) = &filter.survey_id {
        query = query
            .filter(survey_responses::survey_id.eq(survey_id.as_str()));
    }
    if let Some(email) = &filter.respondent_email {
        query = query
            .filter(survey_responses::respondent_email.eq(email.as_str()));
    }

    query
}

pub fn load_response_page(
    filter: &ResponseFilter,
    params: &PageParams,
    conn: &mut SqliteConnection,
) -> Result<Page<SurveyResponse>, FailureResponse> {
    params.validate()?;
    let sort = ResponseSortField::parse(&params.sort_by)?;
    let direction = SortDirection::parse(&params.sort_direction);

    let total = filtered(filter)
        .count()
        .get_result::<i64>(conn)
        .map_err(FailureResponse::from)?;

    use ResponseSortField::*;
    use SortDirection::*;

    let query = filtered(filter);
    let query = match (sort, direction) {
        (Id, Asc) => query.order(survey_responses::id.asc()),
        (Id, Desc) => query.order(survey_responses::id.desc()),
        (SurveyId, Asc) => query.order(survey_responses::survey_id.asc()),
        (SurveyId, Desc) => query.order(survey_responses::survey_id.desc()),
        (RespondentEmail, Asc) => {
            query.order(survey_responses::respondent_email.asc())
        }
        (RespondentEmail, Desc) => {
            query.order(survey_responses::respondent_email.desc())
        }
        (Status, Asc) => query.order(survey_responses::status.asc()),
        (Status, Desc) => query.order(survey_responses::status.desc()),
        (SubmittedAt, Asc) => {
            query.order(survey_responses::submitted_at.asc())
        }
        (SubmittedAt, Desc) => {
            query.order(survey_responses::submitted_at.desc())
        }
    };

    let content = query
        .limit(params.size)
        .offset(params.offset())
        .load::<SurveyResponse>(conn)
        .map_err(FailureResponse::from)?;

    Ok(Page::new(content, params.page, params.size, total))
}

/// The survey id is stamped from the path; whether the survey exists is
/// deliberately not checked, and the answers are not matched against the
/// survey's questions.
pub async fn submit_response(
    Path(id): Path<String>,
    mut conn: Conn,
    body: Result<Json<SubmitResponseBody>, JsonRejection>,
) -> StandardResponse {
    let Json(body) = body
        .map_err(|e| FailureResponse::BadRequest(e.body_text()))?;

    let response = SurveyResponse {
        id: Uuid::now_v7().to_string(),
        survey_id: id,
        answers_json: body.answers_json.unwrap_or_else(|| "[]".to_string()),
        respondent_email: body.respondent_email,
        status: body.status.unwrap_or_else(|| "COMPLETED".to_string()),
        submitted_at: Utc::now().naive_utc(),
    };

    diesel::insert_into(survey_responses::table)
        .values(&response)
        .execute(&mut *conn)
        .map_err(FailureResponse::from)?;

    created(&response)
}

pub async fn list_survey_responses(
    Path(id): Path<String>,
    mut conn: Conn,
) -> StandardResponse {
    let responses = survey_responses::table
        .filter(survey_responses::survey_id.eq(&id))
        .load::<SurveyResponse>(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&responses)
}

pub async fn survey_responses_paginated(
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let filter = ResponseFilter {
        survey_id: Some(id),
        ..Default::default()
    };
    let page = load_response_page(&filter, &params, &mut *conn)?;

    success(&page)
}

pub async fn responses_by_respondent_paginated(
    Path(email): Path<String>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let filter = ResponseFilter {
        respondent_email: Some(email),
        ..Default::default()
    };
    let page = load_response_page(&filter, &params, &mut *conn)?;

    success(&page)
}

pub async fn survey_response_count(
    Path(id): Path<String>,
    mut conn: Conn,
) -> StandardResponse {
    let count = survey_responses::table
        .filter(survey_responses::survey_id.eq(&id))
        .count()
        .get_result::<i64>(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&json!({ "count": count }))
}
