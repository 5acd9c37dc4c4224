//! Search Errors

use salvo::{
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use bazaar_app::domain::search::SearchServiceError;

const QUERY_REQUIRED: &str = "Search query is required";

/// Body of a rejected search.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
}

/// Search failures. A missing query is answered with a JSON body the
/// storefront can show; everything else is a plain status error.
#[derive(Debug)]
pub(crate) enum SearchError {
    QueryRequired,
    Status(StatusError),
}

impl From<StatusError> for SearchError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

impl From<SearchServiceError> for SearchError {
    fn from(error: SearchServiceError) -> Self {
        match error {
            SearchServiceError::InvalidQuery => Self::QueryRequired,
            SearchServiceError::Sql(source) => {
                error!("search storage error: {source}");

                Self::Status(StatusError::internal_server_error())
            }
        }
    }
}

impl Scribe for SearchError {
    fn render(self, res: &mut Response) {
        match self {
            Self::QueryRequired => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(SearchErrorResponse {
                    success: false,
                    error: QUERY_REQUIRED.to_string(),
                }));
            }
            Self::Status(error) => res.render(error),
        }
    }
}

impl EndpointOutRegister for SearchError {
    fn register(components: &mut Components, operation: &mut Operation) {
        operation.responses.insert(
            StatusCode::BAD_REQUEST.as_str(),
            oapi::Response::new("Missing or blank search query")
                .add_content("application/json", SearchErrorResponse::to_schema(components)),
        );
        operation.responses.insert(
            StatusCode::INTERNAL_SERVER_ERROR.as_str(),
            oapi::Response::new("Internal Server Error")
                .add_content("application/json", StatusError::to_schema(components)),
        );
    }
}

/// Errors from endpoints that never see a rejected query.
pub(crate) fn into_status_error(error: SearchServiceError) -> StatusError {
    match error {
        SearchServiceError::InvalidQuery => StatusError::bad_request().brief(QUERY_REQUIRED),
        SearchServiceError::Sql(source) => {
            error!("search storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
