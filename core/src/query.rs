use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};

/// Parsed query: words that must match and words that exclude a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if is_minus && word.is_empty() {
        return Err(SearchError::InvalidQuery("minus sign with no following word".into()));
    }
    if is_minus && word.starts_with('-') {
        return Err(SearchError::InvalidQuery(format!("double minus sign in {token:?}")));
    }
    if !is_valid_word(word) {
        return Err(SearchError::InvalidQuery(format!("invalid characters in {token:?}")));
    }
    Ok(QueryWord { word, is_minus })
}

/// Parse raw query text. Stop words are validated, then dropped from both sets.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(text) {
        let QueryWord { word, is_minus } = parse_query_word(token)?;
        if stop_words.is_stop(word) {
            continue;
        }
        if is_minus {
            query.minus_words.insert(word.to_string());
        } else {
            query.plus_words.insert(word.to_string());
        }
    }
    Ok(query)
}
