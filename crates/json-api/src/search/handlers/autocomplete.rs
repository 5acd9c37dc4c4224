//! Autocomplete Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::search::autocomplete::{Autocomplete, Suggestion};

use crate::{extensions::*, search::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuggestionResponse {
    /// One of `product`, `category`, `popular`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub slug: String,

    /// Catalog identifier; absent for popular terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Storefront path to navigate to
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AutocompleteResponse {
    /// The trimmed, lowercased query
    pub query: String,
    pub suggestions: Vec<SuggestionResponse>,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(suggestion: Suggestion) -> Self {
        SuggestionResponse {
            kind: suggestion.kind.as_str().to_string(),
            name: suggestion.name,
            slug: suggestion.slug,
            id: suggestion.id,
            url: suggestion.url,
        }
    }
}

impl From<Autocomplete> for AutocompleteResponse {
    fn from(autocomplete: Autocomplete) -> Self {
        AutocompleteResponse {
            query: autocomplete.query,
            suggestions: autocomplete.suggestions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Autocomplete Handler
///
/// Suggests products, categories and popular terms for a partial query.
/// Queries shorter than two characters get no suggestions.
#[endpoint(tags("search"), summary = "Search Suggestions")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AutocompleteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = q.into_inner().unwrap_or_default();

    let autocomplete = state
        .app
        .search
        .autocomplete(&query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(autocomplete.into()))
}
