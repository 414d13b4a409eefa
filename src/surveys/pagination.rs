use serde::{Deserialize, Serialize};

use crate::util_resp::FailureResponse;

/// Offset pagination parameters, deserialized from the query string.
/// Defaults: first page, ten entries, ascending id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageParams {
    pub page: i64,
    pub size: i64,
    pub sort_by: String,
    pub sort_direction: String,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "id".to_string(),
            sort_direction: "asc".to_string(),
        }
    }
}

impl PageParams {
    pub fn validate(&self) -> Result<(), FailureResponse> {
        if self.page < 0 {
            return Err(FailureResponse::BadRequest(
                "page must not be negative".to_string(),
            ));
        }
        if self.size < 1 {
            return Err(FailureResponse::BadRequest(
                "size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` (in any case) sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(
        content: Vec<T>,
        number: i64,
        size: i64,
        total_elements: i64,
    ) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };

        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }
}
