//! Scores a document against a query tree

use crate::term::Term;
use crate::token::Token;
use crate::document::Document;
use crate::similarity::Similarity;
use crate::payload::PayloadFunction;
use crate::store::IndexReader;
use crate::query::{Query, FieldTerm, Occur, PayloadTermQuery};
use crate::query::spans::find_spans;


fn term_score<R: IndexReader>(reader: &R, similarity: &Similarity, field: &str, term: &Term, term_freq: u32, length: u32) -> f64 {
    similarity.model.score(
        term_freq,
        length,
        reader.total_tokens(field),
        reader.num_docs(),
        reader.term_doc_freq(field, term),
    )
}


/// Collects the payload multipliers of the tokens that carry a payload
fn payload_scores<'a, I: Iterator<Item=&'a Token>>(tokens: I, similarity: &Similarity) -> Vec<f32> {
    tokens
        .filter(|token| token.has_payload())
        .map(|token| similarity.score_payload(&token.payload))
        .collect()
}


fn score_payload_term<R: IndexReader>(reader: &R, doc: &Document, similarity: &Similarity, query: &PayloadTermQuery) -> Option<f64> {
    let tokens = doc.field_tokens(&query.field);
    let matched = tokens.iter().filter(|token| token.term == query.term).collect::<Vec<_>>();
    if matched.is_empty() {
        return None;
    }

    let score = term_score(reader, similarity, &query.field, &query.term, matched.len() as u32, tokens.len() as u32);
    let payload_score = query.function.doc_score(&payload_scores(matched.into_iter(), similarity));

    Some(score * payload_score as f64)
}


/// Scores span matches like a term whose frequency is the number of spans
///
/// The rarest term of the span decides the document frequency.
fn span_score<R: IndexReader>(reader: &R, similarity: &Similarity, field: &str, terms: &[&Term], num_spans: usize, length: u32) -> f64 {
    let mut rarest_term = terms[0];
    let mut rarest_doc_freq = reader.term_doc_freq(field, rarest_term);
    for term in terms[1..].iter() {
        let doc_freq = reader.term_doc_freq(field, term);
        if doc_freq < rarest_doc_freq {
            rarest_term = *term;
            rarest_doc_freq = doc_freq;
        }
    }

    term_score(reader, similarity, field, rarest_term, num_spans as u32, length)
}


fn score_phrase<R: IndexReader>(reader: &R, doc: &Document, similarity: &Similarity, terms: &[FieldTerm], slop: u32, in_order: bool) -> Option<f64> {
    let field = match terms.first() {
        Some(first) => &first.field,
        None => return None,
    };

    let tokens = doc.field_tokens(field);
    let phrase_terms = terms.iter().map(|field_term| &field_term.term).collect::<Vec<_>>();
    let spans = find_spans(tokens, &phrase_terms, slop, in_order);
    if spans.is_empty() {
        return None;
    }

    Some(span_score(reader, similarity, field, &phrase_terms, spans.len(), tokens.len() as u32))
}


fn score_payload_near<R: IndexReader>(reader: &R, doc: &Document, similarity: &Similarity, clauses: &[PayloadTermQuery], slop: u32, in_order: bool, function: PayloadFunction) -> Option<f64> {
    let field = match clauses.first() {
        Some(first) => &first.field,
        None => return None,
    };

    let tokens = doc.field_tokens(field);
    let near_terms = clauses.iter().map(|clause| &clause.term).collect::<Vec<_>>();
    let spans = find_spans(tokens, &near_terms, slop, in_order);
    if spans.is_empty() {
        return None;
    }

    let score = span_score(reader, similarity, field, &near_terms, spans.len(), tokens.len() as u32);
    let span_tokens = spans.iter().flat_map(|span| span.iter().cloned());
    let payload_score = function.doc_score(&payload_scores(span_tokens, similarity));

    Some(score * payload_score as f64)
}


impl Query {
    /// Scores a document, or returns `None` if the document doesn't match
    pub fn score<R: IndexReader>(&self, reader: &R, doc: &Document, similarity: &Similarity) -> Option<f64> {
        match *self {
            Query::MatchAll{boost} => Some(boost),
            Query::MatchNone => None,
            Query::Term{ref field, ref term, boost} => {
                let tokens = doc.field_tokens(field);
                let term_freq = tokens.iter().filter(|token| &token.term == term).count() as u32;
                if term_freq == 0 {
                    return None;
                }

                Some(term_score(reader, similarity, field, term, term_freq, tokens.len() as u32) * boost)
            }
            Query::Prefix{ref field, ref prefix, boost} => {
                // Constant score, like a filter
                let prefix = prefix.as_bytes();
                if doc.field_tokens(field).iter().any(|token| token.term.as_bytes().starts_with(prefix)) {
                    Some(boost)
                } else {
                    None
                }
            }
            Query::Phrase{ref terms, slop, in_order, boost} => {
                score_phrase(reader, doc, similarity, terms, slop, in_order).map(|score| score * boost)
            }
            Query::DisjunctionMax{ref queries, tie_breaker, boost} => {
                let mut max_score: Option<f64> = None;
                let mut total_score = 0.0f64;

                for query in queries.iter() {
                    if let Some(score) = query.score(reader, doc, similarity) {
                        total_score += score;
                        max_score = Some(match max_score {
                            Some(max_score) => max_score.max(score),
                            None => score,
                        });
                    }
                }

                max_score.map(|max_score| (max_score + tie_breaker * (total_score - max_score)) * boost)
            }
            Query::Boolean{ref clauses, minimum_should_match, boost} => {
                let mut total_score = 0.0f64;
                let mut has_must = false;
                let mut should_matched = 0;

                for clause in clauses.iter() {
                    let score = clause.query.score(reader, doc, similarity);

                    match clause.occur {
                        Occur::Must => {
                            has_must = true;
                            match score {
                                Some(score) => total_score += score,
                                None => return None,
                            }
                        }
                        Occur::Should => {
                            if let Some(score) = score {
                                should_matched += 1;
                                total_score += score;
                            }
                        }
                        Occur::MustNot => {
                            if score.is_some() {
                                return None;
                            }
                        }
                    }
                }

                let required_should = if has_must {
                    minimum_should_match
                } else {
                    minimum_should_match.max(1)
                };

                if should_matched < required_should {
                    return None;
                }

                Some(total_score * boost)
            }
            Query::PayloadTerm{ref query, boost} => {
                score_payload_term(reader, doc, similarity, query).map(|score| score * boost)
            }
            Query::PayloadNear{ref clauses, slop, in_order, function, boost} => {
                score_payload_near(reader, doc, similarity, clauses, slop, in_order, function).map(|score| score * boost)
            }
        }
    }
}
