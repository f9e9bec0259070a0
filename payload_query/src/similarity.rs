use crate::payload;


#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityModel {
    TfIdf,
    Bm25{k1: f64, b: f64},
}


/// tf(term_frequency) = log(term_frequency + 1.0) + 1.0
#[inline]
fn tf(term_frequency: u32) -> f64 {
    (term_frequency as f64 + 1.0f64).ln() + 1.0
}


/// idf(term_docs, total_docs) = log((total_docs + 1.0) / (term_docs + 1.0)) + 1.0
#[inline]
fn idf(term_docs: u64, total_docs: u64) -> f64 {
    ((total_docs as f64 + 1.0) / (term_docs as f64 + 1.0)).ln() + 1.0
}


impl SimilarityModel {
    pub fn score(&self, term_frequency: u32, length: u32, total_tokens: u64, total_docs: u64, total_docs_with_term: u64) -> f64 {
        match *self {
            SimilarityModel::TfIdf => {
                let tf = tf(term_frequency);
                let idf = idf(total_docs_with_term, total_docs);

                tf * idf
            }
            SimilarityModel::Bm25{k1, b} => {
                let tf = tf(term_frequency);
                let idf = idf(total_docs_with_term, total_docs);
                let average_length = (total_tokens as f64 + 1.0f64) / (total_docs as f64 + 1.0f64);
                let length = length as f64;

                idf * (k1 + 1.0) * (tf / (tf + (k1 * ((1.0 - b) + b * length.sqrt() / average_length.sqrt())) + 1.0f64))
            }
        }
    }
}


impl Default for SimilarityModel {
    fn default() -> SimilarityModel {
        SimilarityModel::Bm25 {
            k1: 1.2,
            b: 0.75,
        }
    }
}


/// Turns the payload of a matched term occurrence into a score multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSimilarity {
    /// Payloads are ignored, every occurrence scores 1.0
    Neutral,

    /// Payloads hold a big-endian float written at index time
    DecodeFloat,
}


impl PayloadSimilarity {
    #[inline]
    pub fn score_payload(&self, payload: &[u8]) -> f32 {
        match *self {
            PayloadSimilarity::Neutral => 1.0,
            PayloadSimilarity::DecodeFloat => payload::score_payload(payload),
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Similarity {
    pub model: SimilarityModel,
    pub payloads: PayloadSimilarity,
}


impl Similarity {
    pub fn new(model: SimilarityModel, payloads: PayloadSimilarity) -> Similarity {
        Similarity {
            model: model,
            payloads: payloads,
        }
    }

    #[inline]
    pub fn score_payload(&self, payload: &[u8]) -> f32 {
        self.payloads.score_payload(payload)
    }
}


impl Default for Similarity {
    fn default() -> Similarity {
        Similarity::new(SimilarityModel::default(), PayloadSimilarity::DecodeFloat)
    }
}
