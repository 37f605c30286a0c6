use std::collections::BTreeMap;

use crate::document::{average_rating, Document, DocumentRecord, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{InvertedIndex, TermFrequency};
use crate::query::{parse_query, Query};
use crate::store::DocumentStore;
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use crate::DocumentId;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// In-memory TF-IDF search engine over short text documents.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { stop_words: StopWords::from_words(words)?, ..Self::default() })
    }

    /// Stop words given as one space-delimited string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self { stop_words: StopWords::parse(text)?, ..Self::default() })
    }

    /// Index a document. All validation happens before the index or store is touched.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidId(id));
        }
        if self.documents.contains(id) {
            return Err(SearchError::DuplicateId(id));
        }
        let words = self.split_into_words_no_stop(text)?;

        self.index.insert(id, &words);
        let rating = average_rating(ratings);
        self.documents.insert(id, DocumentRecord { rating, status });
        tracing::debug!(doc_id = id, words = words.len(), rating, %status, "document added");
        Ok(())
    }

    /// Remove a document and every index entry referencing it. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId) {
        if self.documents.remove(id).is_none() {
            return;
        }
        self.index.remove(id);
        tracing::debug!(doc_id = id, "document removed");
    }

    /// Top documents with status ACTUAL.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Top documents accepted by `filter(id, status, rating)`, best first.
    pub fn find_top_documents_with<F>(&self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(&query, filter);
        let total_hits = matched.len();
        sort_by_relevance(&mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        tracing::debug!(query = raw_query, total_hits, returned = matched.len(), "search");
        Ok(matched)
    }

    /// Plus words of the query found in document `id`, sorted. Empty when any minus word matches.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let status = self
            .documents
            .get(id)
            .map(|record| record.status)
            .ok_or(SearchError::UnknownDocument(id))?;

        if query.minus_words.iter().any(|word| self.index.contains(word, id)) {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|word| self.index.contains(word, id))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_id_at(&self, index: usize) -> Result<DocumentId> {
        self.documents.id_at(index)
    }

    /// Word -> term frequency for one document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<String, TermFrequency> {
        self.index.word_frequencies(id).cloned().unwrap_or_default()
    }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.ids()
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidContent(word.to_string()));
            }
            if !self.stop_words.is_stop(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn inverse_document_freq(&self, docs_with_word: usize) -> f64 {
        (self.document_count() as f64 / docs_with_word as f64).ln()
    }

    fn find_all_documents<F>(&self, query: &Query, filter: F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(docs) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(docs.len());
            for (&doc_id, &tf) in docs {
                let Some(record) = self.documents.get(doc_id) else {
                    continue;
                };
                if filter(doc_id, record.status, record.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += idf * tf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(docs) = self.index.postings(word) {
                for doc_id in docs.keys() {
                    relevance.remove(doc_id);
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(doc_id, rel)| {
                self.documents
                    .get(doc_id)
                    .map(|record| Document::new(doc_id, rel, record.rating))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.ids()
    }
}

/// `lhs` ranks strictly before `rhs`: higher relevance, or higher rating when relevances are within epsilon.
fn ranks_before(lhs: &Document, rhs: &Document) -> bool {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        lhs.rating > rhs.rating
    } else {
        lhs.relevance > rhs.relevance
    }
}

/// The epsilon comparison is not transitive, so `sort_by` on it may panic.
/// Sort on a total order first, then settle near-ties with an insertion pass.
fn sort_by_relevance(docs: &mut [Document]) {
    docs.sort_by(|lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| rhs.rating.cmp(&lhs.rating))
            .then_with(|| lhs.id.cmp(&rhs.id))
    });
    for i in 1..docs.len() {
        let mut j = i;
        while j > 0 && ranks_before(&docs[j], &docs[j - 1]) {
            docs.swap(j, j - 1);
            j -= 1;
        }
    }
}
