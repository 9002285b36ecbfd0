//! Boolean inverted index: term -> ordered posting set.
//!
//! The index is parametric over the document ID. Deployment uses the
//! document's source URL (`String`); anything ordered and cloneable works.

use crate::hashmap::HashMap;
use crate::skiplist::SkipList;

/// Snapshot of index shape, logged after the corpus load.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    /// Term with the largest posting list, with its document count.
    pub largest_term: Option<(String, usize)>,
    /// Term with the smallest posting list, with its document count.
    pub smallest_term: Option<(String, usize)>,
}

pub struct BooleanIndex<D> {
    postings: HashMap<String, SkipList<D>>,
    all_documents: SkipList<D>,
    total_documents: usize,
    max_responses: usize,
}

impl<D: Ord + Clone> BooleanIndex<D> {
    /// Index with unbounded query results.
    pub fn new() -> Self {
        Self::with_max_responses(0)
    }

    /// `max_responses` caps the length of AND/OR results; 0 means unbounded.
    pub fn with_max_responses(max_responses: usize) -> Self {
        Self {
            postings: HashMap::new(),
            all_documents: SkipList::new(),
            total_documents: 0,
            max_responses,
        }
    }

    /// Adds a document under each of its terms. Returns true if the ID was
    /// new. Re-adding an existing ID merges its terms into the posting sets
    /// without touching the document counter.
    pub fn add_document<T: AsRef<str>>(&mut self, doc_id: D, terms: &[T]) -> bool {
        let newly_added = self.all_documents.insert(doc_id.clone());
        if newly_added {
            self.total_documents += 1;
        }

        for term in terms {
            let term = term.as_ref();
            match self.postings.get_mut(term) {
                Some(list) => {
                    list.insert(doc_id.clone());
                }
                None => {
                    let mut list = SkipList::new();
                    list.insert(doc_id.clone());
                    self.postings.insert(term.to_owned(), list);
                }
            }
        }

        newly_added
    }

    /// Removes a document from the listed terms' posting sets. Unknown IDs
    /// return false and change nothing; terms not in the index are skipped.
    /// Posting sets that become empty are retained.
    pub fn remove_document<T: AsRef<str>>(&mut self, doc_id: &D, terms: &[T]) -> bool {
        if !self.all_documents.contains(doc_id) {
            return false;
        }

        for term in terms {
            if let Some(list) = self.postings.get_mut(term.as_ref()) {
                list.remove(doc_id);
            }
        }

        self.all_documents.remove(doc_id);
        self.total_documents -= 1;
        true
    }

    /// Documents containing every term, ascending, capped at `max_responses`.
    ///
    /// Drives the intersection from the smallest posting set and probes the
    /// others, so the cost is proportional to the smallest list. Any term
    /// absent from the index empties the result.
    pub fn and_query<T: AsRef<str>>(&self, terms: &[T]) -> Vec<D> {
        if terms.is_empty() {
            return Vec::new();
        }

        let mut lists = Vec::with_capacity(terms.len());
        for term in terms {
            match self.postings.get(term.as_ref()) {
                Some(list) => lists.push(list),
                None => return Vec::new(),
            }
        }

        let mut smallest = 0;
        for (position, list) in lists.iter().enumerate() {
            if list.len() < lists[smallest].len() {
                smallest = position;
            }
        }

        let mut result = Vec::new();
        for doc_id in lists[smallest].iter() {
            let in_all = lists
                .iter()
                .enumerate()
                .all(|(position, list)| position == smallest || list.contains(doc_id));
            if in_all {
                result.push(doc_id.clone());
                if self.max_responses != 0 && result.len() >= self.max_responses {
                    break;
                }
            }
        }
        result
    }

    /// Documents containing any term, ascending, capped at `max_responses`.
    /// Terms absent from the index are skipped.
    pub fn or_query<T: AsRef<str>>(&self, terms: &[T]) -> Vec<D> {
        if terms.is_empty() {
            return Vec::new();
        }

        let mut union = SkipList::new();
        'fold: for term in terms {
            let list = match self.postings.get(term.as_ref()) {
                Some(list) => list,
                None => continue,
            };
            for doc_id in list.iter() {
                if self.max_responses != 0 && union.len() >= self.max_responses {
                    break 'fold;
                }
                union.insert(doc_id.clone());
            }
        }

        union.iter().cloned().collect()
    }

    /// Ascending posting list of a single term; empty if the term is absent.
    pub fn get_documents_for_term(&self, term: &str) -> Vec<D> {
        match self.postings.get(term) {
            Some(list) => list.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn contains_document(&self, doc_id: &D) -> bool {
        self.all_documents.contains(doc_id)
    }

    /// Number of documents containing `term`.
    pub fn get_term_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, SkipList::len)
    }

    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    pub fn total_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn get_all_terms(&self) -> Vec<String> {
        self.postings.iter().map(|(term, _)| term.clone()).collect()
    }

    pub fn get_all_documents(&self) -> Vec<D> {
        self.all_documents.iter().cloned().collect()
    }

    pub fn max_responses(&self) -> usize {
        self.max_responses
    }

    pub fn stats(&self) -> IndexStats {
        let mut largest: Option<(String, usize)> = None;
        let mut smallest: Option<(String, usize)> = None;
        for (term, list) in self.postings.iter() {
            let size = list.len();
            if largest.as_ref().map_or(true, |(_, s)| size > *s) {
                largest = Some((term.clone(), size));
            }
            if smallest.as_ref().map_or(true, |(_, s)| size < *s) {
                smallest = Some((term.clone(), size));
            }
        }
        IndexStats {
            total_documents: self.total_documents,
            total_terms: self.postings.len(),
            largest_term: largest,
            smallest_term: smallest,
        }
    }
}

impl<D: Ord + Clone> Default for BooleanIndex<D> {
    fn default() -> Self {
        Self::new()
    }
}
