pub mod top_score;

pub use self::top_score::TopScoreCollector;


#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMatch {
    id: u32,
    score: Option<f64>,
}


impl DocumentMatch {
    pub fn new_unscored(id: u32) -> DocumentMatch {
        DocumentMatch {
            id: id,
            score: None,
        }
    }

    pub fn new_scored(id: u32, score: f64) -> DocumentMatch {
        DocumentMatch {
            id: id,
            score: Some(score),
        }
    }

    #[inline]
    pub fn doc_id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.score
    }
}


pub trait Collector {
    fn needs_score(&self) -> bool;
    fn collect(&mut self, doc: DocumentMatch);
}
