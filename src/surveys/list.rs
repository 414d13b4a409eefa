use axum::extract::{Path, Query};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::Deserialize;

use crate::{
    schema::survey_entries,
    state::Conn,
    surveys::{
        SurveyEntry, lower,
        pagination::{Page, PageParams, SortDirection},
    },
    util_resp::{FailureResponse, StandardResponse, success},
};

/// Optional equality/substring filters. An absent filter leaves the result
/// set unconstrained.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub creator_email: Option<String>,
    pub status: Option<String>,
}

/// Fields surveys may be sorted by. Sort keys arrive as raw query-string
/// values, so anything outside this list is rejected up front.
#[derive(Debug, Clone, Copy)]
pub enum SurveySortField {
    Id,
    Title,
    Description,
    CreatorEmail,
    Status,
    CreatedAt,
}

impl SurveySortField {
    pub fn parse(raw: &str) -> Result<Self, FailureResponse> {
        match raw {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "creatorEmail" => Ok(Self::CreatorEmail),
            "status" => Ok(Self::Status),
            "createdAt" => Ok(Self::CreatedAt),
            _ => Err(FailureResponse::BadRequest(format!(
                "cannot sort surveys by `{raw}`"
            ))),
        }
    }
}

fn filtered<'a>(
    filter: &'a SurveyFilter,
) -> survey_entries::BoxedQuery<'a, Sqlite> {
    let mut query = survey_entries::table.into_boxed();

    if let Some(title) = &filter.title {
        query = query.filter(
            lower(survey_entries::title)
                .like(format!("%{}%", title.to_lowercase())),
        );
    }
    if let Some(description) = &filter.description {
        query = query.filter(
            lower(survey_entries::description)
                .like(format!("%{}%", description.to_lowercase())),
        );
    }
    if let Some(email) = &filter.creator_email {
        query =
            query.filter(survey_entries::creator_email.eq(email.as_str()));
    }
    if let Some(status) = &filter.status {
        query = query.filter(survey_entries::status.eq(status.as_str()));
    }

    query
}

pub fn load_survey_page(
    filter: &SurveyFilter,
    params: &PageParams,
    conn: &mut SqliteConnection,
) -> Result<Page<SurveyEntry>, FailureResponse> {
    params.validate()?;
    let sort = SurveySortField::parse(&params.sort_by)?;
    let direction = SortDirection::parse(&params.sort_direction);

    let total = filtered(filter)
        .count()
        .get_result::<i64>(conn)
        .map_err(FailureResponse::from)?;

    use SortDirection::*;
    use SurveySortField::*;

    let query = filtered(filter);
    let query = match (sort, direction) {
        (Id, Asc) => query.order(survey_entries::id.asc()),
        (Id, Desc) => query.order(survey_entries::id.desc()),
        (Title, Asc) => query.order(survey_entries::title.asc()),
        (Title, Desc) => query.order(survey_entries::title.desc()),
        (Description, Asc) => query.order(survey_entries::description.asc()),
        (Description, Desc) => {
            query.order(survey_entries::description.desc())
        }
        (CreatorEmail, Asc) => {
            query.order(survey_entries::creator_email.asc())
        }
        (CreatorEmail, Desc) => {
            query.order(survey_entries::creator_email.desc())
        }
        (Status, Asc) => query.order(survey_entries::status.asc()),
        (Status, Desc) => query.order(survey_entries::status.desc()),
        (CreatedAt, Asc) => query.order(survey_entries::created_at.asc()),
        (CreatedAt, Desc) => query.order(survey_entries::created_at.desc()),
    };

    let content = query
        .limit(params.size)
        .offset(params.offset())
        .load::<SurveyEntry>(conn)
        .map_err(FailureResponse::from)?;

    Ok(Page::new(content, params.page, params.size, total))
}

pub async fn all_surveys(mut conn: Conn) -> StandardResponse {
    let surveys = survey_entries::table
        .load::<SurveyEntry>(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&surveys)
}

pub async fn surveys_paginated(
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let page =
        load_survey_page(&SurveyFilter::default(), &params, &mut *conn)?;

    success(&page)
}

pub async fn surveys_filtered(
    Query(filter): Query<SurveyFilter>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let page = load_survey_page(&filter, &params, &mut *conn)?;

    success(&page)
}

pub async fn surveys_by_creator(
    Path(email): Path<String>,
    mut conn: Conn,
) -> StandardResponse {
    let surveys = survey_entries::table
        .filter(survey_entries::creator_email.eq(&email))
        .load::<SurveyEntry>(&mut *conn)
        .map_err(FailureResponse::from)?;

    success(&surveys)
}

pub async fn surveys_by_creator_paginated(
    Path(email): Path<String>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let filter = SurveyFilter {
        creator_email: Some(email),
        ..Default::default()
    };
    let page = load_survey_page(&filter, &params, &mut *conn)?;

    success(&page)
}

pub async fn surveys_by_status_paginated(
    Path(status): Path<String>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let filter = SurveyFilter {
        status: Some(status),
        ..Default::default()
    };
    let page = load_survey_page(&filter, &params, &mut *conn)?;

    success(&page)
}

pub async fn surveys_by_creator_and_status_paginated(
    Path((email, status)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    mut conn: Conn,
) -> StandardResponse {
    let filter = SurveyFilter {
        creator_email: Some(email),
        status: Some(status),
        ..Default::default()
    };
    let page = load_survey_page(&filter, &params, &mut *conn)?;

    success(&page)
}
