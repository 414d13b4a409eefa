use axum::extract::Path;

use crate::{
    state::Conn,
    surveys::SurveyEntry,
    util_resp::{StandardResponse, success},
};

pub async fn survey_by_id(
    Path(id): Path<String>,
    mut conn: Conn,
) -> StandardResponse {
    let entry = SurveyEntry::fetch(&id, &mut *conn)?;

    success(&entry)
}
