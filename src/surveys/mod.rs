use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde::Serialize;

use crate::{
    schema::survey_entries,
    util_resp::FailureResponse,
};

pub mod create;
pub mod delete;
pub mod list;
pub mod pagination;
pub mod responses;
pub mod update;
pub mod view;

diesel::define_sql_function! {
    /// SQLite `lower`, for case-insensitive substring filters.
    fn lower(x: Text) -> Text;
}

#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = survey_entries)]
pub struct SurveyEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions_json: String,
    pub responses_json: String,
    pub creator_email: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl SurveyEntry {
    pub fn fetch(
        id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Self, FailureResponse> {
        let entry = survey_entries::table
            .filter(survey_entries::id.eq(id))
            .first::<SurveyEntry>(conn)
            .optional()
            .map_err(FailureResponse::from)?;

        match entry {
            Some(entry) => Ok(entry),
            None => Err(FailureResponse::NotFound(())),
        }
    }
}

/// Checks that a questions payload is a JSON array. Empty (or
/// whitespace-only) payloads pass; only what the caller actually sent is
/// validated.
pub fn ensure_json_array(
    raw: &str,
    field: &str,
) -> Result<(), FailureResponse> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) if value.is_array() => Ok(()),
        Ok(_) => Err(FailureResponse::BadRequest(format!(
            "{field} must be a JSON array"
        ))),
        Err(_) => Err(FailureResponse::BadRequest(format!(
            "{field} is not valid JSON"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_json_array;

    #[test]
    fn json_array_validation() {
        assert!(ensure_json_array("[]", "questionsJson").is_ok());
        assert!(ensure_json_array(r#"["Q1", "Q2"]"#, "questionsJson").is_ok());
        assert!(ensure_json_array("", "questionsJson").is_ok());
        assert!(ensure_json_array("   ", "questionsJson").is_ok());
        assert!(ensure_json_array(r#"{"a": 1}"#, "questionsJson").is_err());
        assert!(ensure_json_array("[unclosed", "questionsJson").is_err());
    }
}
