use axum::extract::Path;
use diesel::prelude::*;
use serde_json::json;

use crate::{
    auth::User,
    schema::{survey_entries, survey_responses},
    state::Conn,
    surveys::SurveyEntry,
    util_resp::{FailureResponse, StandardResponse, success},
};

/// Deletes a survey together with every response referencing it. Both
/// deletes run in one transaction so a concurrently submitted response
/// cannot be left orphaned.
pub async fn delete_survey(
    Path(id): Path<String>,
    user: Option<User>,
    mut conn: Conn,
) -> StandardResponse {
    SurveyEntry::fetch(&id, &mut *conn)?;

    if let Some(user) = &user {
        tracing::debug!(principal = %user.email, survey = %id, "authenticated survey deletion");
    }

    let conn = &mut **conn;
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(
            survey_responses::table
                .filter(survey_responses::survey_id.eq(&id)),
        )
        .execute(conn)?;

        diesel::delete(
            survey_entries::table.filter(survey_entries::id.eq(&id)),
        )
        .execute(conn)?;

        Ok(())
    })
    .map_err(FailureResponse::from)?;

    success(&json!({ "message": "Survey deleted successfully" }))
}
