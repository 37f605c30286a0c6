use std::collections::{BTreeSet, HashMap};

use crate::search_server::SearchServer;
use crate::DocumentId;

/// Remove documents whose set of unique words matches an earlier-inserted document.
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut first_seen: HashMap<BTreeSet<String>, DocumentId> = HashMap::new();
    let mut duplicates: BTreeSet<DocumentId> = BTreeSet::new();

    for doc_id in server.document_ids() {
        let words: BTreeSet<String> = server.word_frequencies(doc_id).into_keys().collect();
        if first_seen.contains_key(&words) {
            duplicates.insert(doc_id);
        } else {
            first_seen.insert(words, doc_id);
        }
    }

    for &doc_id in &duplicates {
        tracing::info!(doc_id, "found duplicate document id");
        server.remove_document(doc_id);
    }
    duplicates.into_iter().collect()
}
