use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::collectors::{Collector, DocumentMatch};


#[derive(Debug, Copy, Clone)]
struct ScoredDocument {
    id: u32,
    score: f64,
}


impl Ord for ScoredDocument {
    fn cmp(&self, other: &ScoredDocument) -> Ordering {
        // Flipped so the heap's top is the worst document. Equal scores keep the lower id
        other.score.total_cmp(&self.score).then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for ScoredDocument {
    fn partial_cmp(&self, other: &ScoredDocument) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoredDocument {
    fn eq(&self, other: &ScoredDocument) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDocument {}


/// Keeps the `max_docs` highest scoring documents
#[derive(Debug)]
pub struct TopScoreCollector {
    max_docs: usize,
    heap: BinaryHeap<ScoredDocument>,
    total_hits: u64,
}


impl TopScoreCollector {
    pub fn new(max_docs: usize) -> TopScoreCollector {
        TopScoreCollector {
            max_docs: max_docs,
            heap: BinaryHeap::with_capacity(max_docs + 1),
            total_hits: 0,
        }
    }

    /// Number of documents collected, including those that didn't make the top
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// The kept documents, best first
    pub fn into_sorted_vec(self) -> Vec<DocumentMatch> {
        self.heap.into_sorted_vec().into_iter().map(|scored_document| {
            DocumentMatch::new_scored(scored_document.id, scored_document.score)
        }).collect()
    }
}


impl Collector for TopScoreCollector {
    fn needs_score(&self) -> bool {
        true
    }

    fn collect(&mut self, doc: DocumentMatch) {
        let score = match doc.score() {
            Some(score) if !score.is_nan() => score,
            Some(_) => {
                warn!("document {} has a NaN score, not collecting it", doc.doc_id());
                return;
            }
            None => {
                warn!("document {} is unscored, not collecting it", doc.doc_id());
                return;
            }
        };

        self.total_hits += 1;

        if self.max_docs == 0 {
            return;
        }

        self.heap.push(ScoredDocument {
            id: doc.doc_id(),
            score: score,
        });

        // Now reduce the heap size if it's too big
        if self.heap.len() > self.max_docs {
            self.heap.pop();
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::collectors::{Collector, DocumentMatch};
    use super::TopScoreCollector;

    #[test]
    fn test_top_score_collector_inital_state() {
        let collector = TopScoreCollector::new(10);

        assert_eq!(collector.total_hits(), 0);
        assert_eq!(collector.into_sorted_vec().len(), 0);
    }

    #[test]
    fn test_top_score_collector_needs_score() {
        let collector = TopScoreCollector::new(10);

        assert_eq!(collector.needs_score(), true);
    }

    #[test]
    fn test_top_score_collector_collect() {
        let mut collector = TopScoreCollector::new(10);

        collector.collect(DocumentMatch::new_scored(0, 1.0f64));
        collector.collect(DocumentMatch::new_scored(1, 0.5f64));
        collector.collect(DocumentMatch::new_scored(2, 2.0f64));

        let docs = collector.into_sorted_vec();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].doc_id(), 2);
        assert_eq!(docs[1].doc_id(), 0);
        assert_eq!(docs[2].doc_id(), 1);
    }

    #[test]
    fn test_top_score_collector_truncate() {
        let mut collector = TopScoreCollector::new(2);

        collector.collect(DocumentMatch::new_scored(0, 1.0f64));
        collector.collect(DocumentMatch::new_scored(1, 0.5f64));
        collector.collect(DocumentMatch::new_scored(2, 2.0f64));

        assert_eq!(collector.total_hits(), 3);

        let docs = collector.into_sorted_vec();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].doc_id(), 2);
        assert_eq!(docs[1].doc_id(), 0);
    }

    #[test]
    fn test_top_score_collector_equal_scores_keep_lower_id() {
        let mut collector = TopScoreCollector::new(1);

        collector.collect(DocumentMatch::new_scored(5, 1.0f64));
        collector.collect(DocumentMatch::new_scored(3, 1.0f64));

        let docs = collector.into_sorted_vec();
        assert_eq!(docs[0].doc_id(), 3);
    }

    #[test]
    fn test_top_score_collector_skips_nan_and_unscored() {
        let mut collector = TopScoreCollector::new(10);

        collector.collect(DocumentMatch::new_scored(0, ::std::f64::NAN));
        collector.collect(DocumentMatch::new_unscored(1));

        assert_eq!(collector.total_hits(), 0);
    }
}
