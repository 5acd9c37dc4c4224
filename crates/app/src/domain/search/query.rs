//! Query normalisation.

use smallvec::SmallVec;

use crate::domain::search::errors::SearchServiceError;

/// Tokens shorter than this (in characters) are not used to match candidates.
pub const MIN_TOKEN_CHARS: usize = 2;

/// A trimmed, tokenised search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    phrase: String,
    tokens: SmallVec<[String; 4]>,
}

impl SearchQuery {
    /// Trim and tokenise a raw query string.
    ///
    /// # Errors
    ///
    /// Returns [`SearchServiceError::InvalidQuery`] when the query is empty
    /// after trimming.
    pub fn parse(raw: &str) -> Result<Self, SearchServiceError> {
        let phrase = raw.trim();

        if phrase.is_empty() {
            return Err(SearchServiceError::InvalidQuery);
        }

        Ok(Self {
            phrase: phrase.to_string(),
            tokens: phrase.split_whitespace().map(str::to_string).collect(),
        })
    }

    /// The trimmed query as typed.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Every whitespace separated token, including short ones.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Terms a candidate must match at least one of.
    ///
    /// Tokens of at least [`MIN_TOKEN_CHARS`] characters; the whole phrase
    /// when none qualify.
    pub fn match_terms(&self) -> SmallVec<[&str; 4]> {
        let terms: SmallVec<[&str; 4]> = self
            .tokens
            .iter()
            .map(String::as_str)
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .collect();

        if terms.is_empty() {
            SmallVec::from_slice(&[self.phrase.as_str()])
        } else {
            terms
        }
    }
}
