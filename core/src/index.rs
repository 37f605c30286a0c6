use std::collections::BTreeMap;

use crate::DocumentId;

/// Term frequency: occurrences of a word over the document's indexed word count.
pub type TermFrequency = f64;

/// word -> (document -> tf), with a reverse map for per-document lookup and purging.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<DocumentId, TermFrequency>>,
    doc_words: BTreeMap<DocumentId, BTreeMap<String, TermFrequency>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the (already stop-word-filtered) words of one document.
    /// An empty word list adds nothing.
    pub fn insert(&mut self, doc_id: DocumentId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in words {
            *counts.entry(word).or_insert(0) += 1;
        }
        let total = words.len() as f64;
        let freqs = self.doc_words.entry(doc_id).or_default();
        for (word, count) in counts {
            let tf = count as f64 / total;
            self.postings
                .entry(word.to_string())
                .or_default()
                .insert(doc_id, tf);
            freqs.insert(word.to_string(), tf);
        }
    }

    /// Drop every entry that references `doc_id`. Words left without documents are removed.
    pub fn remove(&mut self, doc_id: DocumentId) {
        let Some(words) = self.doc_words.remove(&doc_id) else {
            return;
        };
        for word in words.keys() {
            if let Some(docs) = self.postings.get_mut(word) {
                docs.remove(&doc_id);
                if docs.is_empty() {
                    self.postings.remove(word);
                }
            }
        }
    }

    /// Documents containing `word`, keyed by id.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, TermFrequency>> {
        self.postings.get(word)
    }

    pub fn contains(&self, word: &str, doc_id: DocumentId) -> bool {
        self.postings
            .get(word)
            .is_some_and(|docs| docs.contains_key(&doc_id))
    }

    pub fn word_frequencies(&self, doc_id: DocumentId) -> Option<&BTreeMap<String, TermFrequency>> {
        self.doc_words.get(&doc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_frequency_is_share_of_words() {
        let mut idx = InvertedIndex::new();
        idx.insert(101, &["fluffy", "cat", "fluffy", "tail"]);
        let docs = idx.postings("fluffy").unwrap();
        assert_eq!(docs.get(&101), Some(&0.5));
        assert_eq!(idx.postings("cat").unwrap().get(&101), Some(&0.25));
        let total: f64 = idx.word_frequencies(101).unwrap().values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_document_adds_nothing() {
        let mut idx = InvertedIndex::new();
        idx.insert(1, &[]);
        assert!(idx.word_frequencies(1).is_none());
    }

    #[test]
    fn remove_purges_postings() {
        let mut idx = InvertedIndex::new();
        idx.insert(0, &["hello", "world"]);
        idx.insert(1, &["hello", "rust"]);
        idx.remove(0);
        assert!(idx.postings("world").is_none());
        let hello = idx.postings("hello").unwrap();
        assert_eq!(hello.len(), 1);
        assert!(hello.contains_key(&1));
        assert!(!idx.contains("hello", 0));
        assert!(idx.word_frequencies(0).is_none());
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut idx = InvertedIndex::new();
        idx.insert(0, &["hello"]);
        idx.remove(99);
        assert!(idx.contains("hello", 0));
    }
}
