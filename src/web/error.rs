use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use super::html;
use crate::pages::PageError;

/// Message shown when database error text is not exposed.
pub const GENERIC_FAILURE: &str = "The data could not be loaded.";

/// What an error page reports: `{ error: 404, msg }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderFailure {
    pub error: u16,
    pub msg: String,
}

impl LoaderFailure {
    /// Log `err` and turn it into the page-level failure.
    ///
    /// Database error text is only passed through when `expose` is set;
    /// missing records always name the entity.
    #[must_use]
    pub fn from_page_error(err: &PageError, expose: bool) -> Self {
        let msg = match err {
            PageError::NotFound(_) => {
                tracing::debug!(error = %err, "page not found");
                err.to_string()
            }
            PageError::Database(db) => {
                tracing::warn!(error = %db, "page loader failed");
                if expose {
                    db.to_string()
                } else {
                    GENERIC_FAILURE.to_string()
                }
            }
        };
        Self {
            error: StatusCode::NOT_FOUND.as_u16(),
            msg,
        }
    }
}

impl IntoResponse for LoaderFailure {
    fn into_response(self) -> Response {
        let body = format!(
            "<p class=\"error\" data-error=\"{}\">{}</p>",
            self.error,
            html::escape(&self.msg)
        );
        let status = StatusCode::from_u16(self.error).unwrap_or(StatusCode::NOT_FOUND);
        (status, Html(html::layout("No results", &body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NorthwindDbError;

    #[test]
    fn database_text_hidden_by_default() {
        let err = PageError::Database(NorthwindDbError::ExecutionError("no such table: Product".into()));

        let hidden = LoaderFailure::from_page_error(&err, false);
        assert_eq!(hidden.error, 404);
        assert_eq!(hidden.msg, GENERIC_FAILURE);

        let shown = LoaderFailure::from_page_error(&err, true);
        assert!(shown.msg.contains("no such table: Product"));
    }

    #[test]
    fn not_found_names_the_entity() {
        let failure = LoaderFailure::from_page_error(&PageError::NotFound("supplier"), false);
        assert_eq!(failure.msg, "No such supplier");
    }

    #[test]
    fn renders_as_404_page() {
        let response = LoaderFailure {
            error: 404,
            msg: "No such order".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
