use std::collections::{BTreeMap, HashMap};

use roaring::RoaringBitmap;

use crate::term::Term;
use crate::document::Document;
use crate::similarity::Similarity;
use crate::query::Query;
use crate::collectors::{Collector, DocumentMatch};
use crate::store::IndexReader;


#[derive(Debug)]
pub struct MemoryIndexFieldTerm {
    pub docs: RoaringBitmap,
}


impl MemoryIndexFieldTerm {
    pub fn new() -> MemoryIndexFieldTerm {
        MemoryIndexFieldTerm {
            docs: RoaringBitmap::new(),
        }
    }
}


#[derive(Debug)]
pub struct MemoryIndexField {
    pub docs: RoaringBitmap,
    pub terms: BTreeMap<Vec<u8>, MemoryIndexFieldTerm>,
    pub num_tokens: u64,
}


impl MemoryIndexField {
    pub fn new() -> MemoryIndexField {
        MemoryIndexField {
            docs: RoaringBitmap::new(),
            terms: BTreeMap::new(),
            num_tokens: 0,
        }
    }
}


/// Holds analysed documents and the per-field statistics used for scoring
#[derive(Debug)]
pub struct MemoryIndex {
    docs: BTreeMap<u32, Document>,
    fields: BTreeMap<String, MemoryIndexField>,
    next_doc_id: u32,
    doc_key2id_map: HashMap<String, u32>,
}


impl MemoryIndex {
    pub fn new() -> MemoryIndex {
        MemoryIndex {
            docs: BTreeMap::new(),
            fields: BTreeMap::new(),
            next_doc_id: 1,
            doc_key2id_map: HashMap::new(),
        }
    }

    /// Adds a document and returns its id
    ///
    /// Returns `None` and leaves the index untouched if a document with the same key
    /// has already been added.
    pub fn insert_document(&mut self, doc: Document) -> Option<u32> {
        if self.doc_key2id_map.contains_key(&doc.key) {
            warn!("document {:?} is already indexed, skipping it", doc.key);
            return None;
        }

        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;

        // Put field contents in inverted index
        for (field_name, tokens) in doc.fields.iter() {
            if tokens.is_empty() {
                continue;
            }

            let field = self.fields.entry(field_name.clone()).or_insert_with(MemoryIndexField::new);
            field.docs.insert(doc_id);
            field.num_tokens += tokens.len() as u64;

            for token in tokens.iter() {
                let term = field.terms.entry(token.term.to_bytes()).or_insert_with(MemoryIndexFieldTerm::new);
                term.docs.insert(doc_id);
            }
        }

        debug!("indexed document {:?} as {}", doc.key, doc_id);

        self.doc_key2id_map.insert(doc.key.clone(), doc_id);
        self.docs.insert(doc_id, doc);

        Some(doc_id)
    }

    pub fn get_document_by_key(&self, doc_key: &str) -> Option<&Document> {
        match self.doc_key2id_map.get(doc_key) {
            Some(doc_id) => self.docs.get(doc_id),
            None => None,
        }
    }

    pub fn get_document_by_id(&self, doc_id: u32) -> Option<&Document> {
        self.docs.get(&doc_id)
    }

    pub fn contains_document_key(&self, doc_key: &str) -> bool {
        self.doc_key2id_map.contains_key(doc_key)
    }

    /// Number of documents that have at least one token in the field
    pub fn field_doc_count(&self, field_name: &str) -> u64 {
        match self.fields.get(field_name) {
            Some(field) => field.docs.len(),
            None => 0,
        }
    }

    /// Scores every document against the query and passes the matches to the collector
    pub fn search<C: Collector>(&self, collector: &mut C, query: &Query, similarity: &Similarity) {
        for (doc_id, doc) in self.docs.iter() {
            if let Some(score) = query.score(self, doc, similarity) {
                if collector.needs_score() {
                    collector.collect(DocumentMatch::new_scored(*doc_id, score));
                } else {
                    collector.collect(DocumentMatch::new_unscored(*doc_id));
                }
            }
        }
    }
}


impl IndexReader for MemoryIndex {
    fn num_docs(&self) -> u64 {
        self.docs.len() as u64
    }

    fn term_doc_freq(&self, field_name: &str, term: &Term) -> u64 {
        let field = match self.fields.get(field_name) {
            Some(field) => field,
            None => return 0,
        };

        match field.terms.get(term.as_bytes()) {
            Some(term) => term.docs.len(),
            None => 0,
        }
    }

    fn total_tokens(&self, field_name: &str) -> u64 {
        match self.fields.get(field_name) {
            Some(field) => field.num_tokens,
            None => 0,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::MemoryIndex;

    use crate::term::Term;
    use crate::token::Token;
    use crate::document::Document;
    use crate::store::IndexReader;

    fn make_test_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();

        index.insert_document(Document {
            key: "test_doc".to_string(),
            fields: hashmap! {
                "title".to_string() => vec![
                    Token::new(Term::from_string("hello"), 1),
                    Token::new(Term::from_string("world"), 2),
                ],
                "body".to_string() => vec![
                    Token::new(Term::from_string("lorem"), 1),
                ],
            }
        });

        index.insert_document(Document {
            key: "another_test_doc".to_string(),
            fields: hashmap! {
                "title".to_string() => vec![
                    Token::new(Term::from_string("howdy"), 1),
                    Token::new(Term::from_string("partner"), 2),
                    Token::new(Term::from_string("world"), 3),
                ],
            }
        });

        index
    }

    #[test]
    fn test_num_docs() {
        let index = make_test_index();

        assert_eq!(index.num_docs(), 2);
    }

    #[test]
    fn test_term_doc_freq() {
        let index = make_test_index();

        assert_eq!(index.term_doc_freq("title", &Term::from_string("world")), 2);
        assert_eq!(index.term_doc_freq("title", &Term::from_string("hello")), 1);
        assert_eq!(index.term_doc_freq("title", &Term::from_string("lorem")), 0);
        assert_eq!(index.term_doc_freq("missing", &Term::from_string("world")), 0);
    }

    #[test]
    fn test_total_tokens() {
        let index = make_test_index();

        assert_eq!(index.total_tokens("title"), 5);
        assert_eq!(index.total_tokens("body"), 1);
        assert_eq!(index.total_tokens("missing"), 0);
    }

    #[test]
    fn test_field_doc_count() {
        let index = make_test_index();

        assert_eq!(index.field_doc_count("title"), 2);
        assert_eq!(index.field_doc_count("body"), 1);
    }

    #[test]
    fn test_get_document_by_key() {
        let index = make_test_index();

        let doc = index.get_document_by_key("another_test_doc").unwrap();
        assert_eq!(doc.field_tokens("title").len(), 3);
        assert!(index.get_document_by_key("missing").is_none());
    }

    #[test]
    fn test_get_document_by_id() {
        let index = make_test_index();

        assert_eq!(index.get_document_by_id(1).unwrap().key, "test_doc");
        assert!(index.get_document_by_id(3).is_none());
    }

    #[test]
    fn test_duplicate_key_is_skipped() {
        let mut index = make_test_index();

        assert_eq!(index.insert_document(Document::new("test_doc".to_string())), None);
        assert_eq!(index.num_docs(), 2);
        assert!(index.contains_document_key("test_doc"));
    }
}
