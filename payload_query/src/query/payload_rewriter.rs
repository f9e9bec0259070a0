//! Rewrites term and phrase queries on payload-bearing fields into queries that
//! score with the payload of each matched occurrence
//!
//! ```
//! # #[macro_use] extern crate maplit;
//! # extern crate payload_query;
//! # fn main() {
//! use payload_query::{Query, Term, PayloadQueryRewriter};
//!
//! let payload_fields = hashset!{"category_en".to_string()};
//! let rewriter = PayloadQueryRewriter::new(&payload_fields, 0.1);
//!
//! let query = rewriter.rewrite(Query::new_term("category_en", Term::from_string("shoes")));
//!
//! match query {
//!     Query::PayloadTerm{..} => (),
//!     _ => panic!("expected a payload term query"),
//! }
//! # }
//! ```

use std::collections::HashSet;

use crate::term::Term;
use crate::payload::PayloadFunction;
use crate::query::{Query, FieldTerm, BooleanClause, PayloadTermQuery};


/// Combines the payloads of every node the rewriter creates
pub const PAYLOAD_FUNCTION: PayloadFunction = PayloadFunction::Max;


#[derive(Debug, Clone)]
pub struct PayloadQueryRewriter<'a> {
    payload_fields: &'a HashSet<String>,
    tie_breaker: f64,
}


impl<'a> PayloadQueryRewriter<'a> {
    pub fn new(payload_fields: &'a HashSet<String>, tie_breaker: f64) -> PayloadQueryRewriter<'a> {
        PayloadQueryRewriter {
            payload_fields: payload_fields,
            tie_breaker: tie_breaker,
        }
    }

    pub fn payload_fields(&self) -> &HashSet<String> {
        self.payload_fields
    }

    pub fn tie_breaker(&self) -> f64 {
        self.tie_breaker
    }

    /// Rewrites a query tree, keeping the boost of the root node
    pub fn rewrite(&self, query: Query) -> Query {
        let boost = query.boost();
        let mut rewritten = self.handle_query(query);
        rewritten.set_boost(boost);
        rewritten
    }

    fn handle_query(&self, query: Query) -> Query {
        match query {
            Query::Term{field, term, boost} => {
                self.handle_term(field, term, boost)
            }
            Query::Phrase{terms, slop, in_order, boost} => {
                self.handle_phrase(terms, slop, in_order, boost)
            }
            Query::DisjunctionMax{queries, ..} => {
                let queries = queries.into_iter().map(|query| self.rewrite(query)).collect();

                Query::new_disjunction_max(queries, self.tie_breaker)
            }
            Query::Boolean{clauses, minimum_should_match, boost} => {
                let clauses = clauses.into_iter().map(|clause| {
                    BooleanClause::new(self.rewrite(clause.query), clause.occur)
                }).collect();

                Query::Boolean {
                    clauses: clauses,
                    minimum_should_match: minimum_should_match,
                    boost: boost,
                }
            }
            query @ Query::MatchAll{..}
            | query @ Query::MatchNone
            | query @ Query::Prefix{..}
            | query @ Query::PayloadTerm{..}
            | query @ Query::PayloadNear{..} => query,
        }
    }

    fn handle_term(&self, field: String, term: Term, boost: f64) -> Query {
        if !self.payload_fields.contains(&field) {
            return Query::Term {
                field: field,
                term: term,
                boost: boost,
            };
        }

        debug!("rewriting term {}:{} into a payload term query", field, term);
        Query::new_payload_term(&field, term, PAYLOAD_FUNCTION)
    }

    fn handle_phrase(&self, terms: Vec<FieldTerm>, slop: u32, in_order: bool, boost: f64) -> Query {
        // Phrases are built over one field, so the first term decides
        let is_payload_phrase = match terms.first() {
            Some(first) => self.payload_fields.contains(&first.field),
            None => false,
        };

        if !is_payload_phrase {
            return Query::Phrase {
                terms: terms,
                slop: slop,
                in_order: in_order,
                boost: boost,
            };
        }

        debug!("rewriting phrase of {} terms into a payload near query (slop {})", terms.len(), slop);

        let clauses = terms.into_iter().map(|field_term| {
            PayloadTermQuery::new(&field_term.field, field_term.term, PAYLOAD_FUNCTION)
        }).collect();

        Query::PayloadNear {
            clauses: clauses,
            slop: slop,
            in_order: false,
            function: PAYLOAD_FUNCTION,
            boost: 1.0f64,
        }
    }
}


/// Shorthand for `PayloadQueryRewriter::new(payload_fields, tie_breaker).rewrite(query)`
pub fn rewrite(query: Query, payload_fields: &HashSet<String>, tie_breaker: f64) -> Query {
    PayloadQueryRewriter::new(payload_fields, tie_breaker).rewrite(query)
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::term::Term;
    use crate::payload::PayloadFunction;
    use crate::query::{Query, FieldTerm, BooleanClause, Occur, PayloadTermQuery};

    use super::{PayloadQueryRewriter, rewrite, PAYLOAD_FUNCTION};

    fn term(field: &str, text: &str) -> Query {
        Query::new_term(field, Term::from_string(text))
    }

    fn phrase(field: &str, words: &[&str], slop: u32) -> Query {
        Query::new_phrase(field, words.iter().map(|word| Term::from_string(word)).collect(), slop)
    }

    fn sample_queries() -> Vec<Query> {
        vec![
            Query::new_match_all().with_boost(1.5),
            Query::MatchNone,
            term("category_en", "shoes").with_boost(2.0),
            Query::new_prefix("category_en", "sho").with_boost(0.5),
            phrase("category_en", &["red", "shoes"], 2).with_boost(3.0),
            Query::new_disjunction_max(vec![
                term("category_en", "shoes").with_boost(4.0),
                term("category_fr", "chaussures"),
            ], 0.3).with_boost(1.25),
            Query::new_boolean(vec![
                BooleanClause::new(term("category_en", "red"), Occur::Must),
                BooleanClause::new(phrase("category_fr", &["rouge", "chaussures"], 1), Occur::Should),
                BooleanClause::new(term("category_en", "blue"), Occur::MustNot),
            ]).with_minimum_should_match(1).with_boost(0.75),
            Query::new_payload_term("category_en", Term::from_string("shoes"), PayloadFunction::Min).with_boost(2.5),
        ]
    }

    #[test]
    fn test_empty_payload_fields_is_identity() {
        let payload_fields = HashSet::new();

        for query in sample_queries() {
            assert_eq!(rewrite(query.clone(), &payload_fields, 0.3), query);
        }
    }

    #[test]
    fn test_boost_is_preserved() {
        let payload_fields = hashset!{"category_en".to_string(), "category_fr".to_string()};

        for query in sample_queries() {
            let boost = query.boost();

            assert_eq!(rewrite(query, &payload_fields, 0.7).boost(), boost);
        }
    }

    #[test]
    fn test_term_on_payload_field() {
        let payload_fields = hashset!{"category_en".to_string()};

        let query = rewrite(term("category_en", "shoes"), &payload_fields, 0.0);

        assert_eq!(query, Query::new_payload_term("category_en", Term::from_string("shoes"), PayloadFunction::Max));
    }

    #[test]
    fn test_term_on_other_field() {
        let payload_fields = hashset!{"category_en".to_string()};

        let query = rewrite(term("other_field", "shoes").with_boost(2.0), &payload_fields, 0.0);

        assert_eq!(query, term("other_field", "shoes").with_boost(2.0));
    }

    #[test]
    fn test_phrase_on_payload_field() {
        let payload_fields = hashset!{"category_en".to_string()};

        let query = rewrite(phrase("category_en", &["red", "shoes"], 2), &payload_fields, 0.0);

        assert_eq!(query, Query::PayloadNear {
            clauses: vec![
                PayloadTermQuery::new("category_en", Term::from_string("red"), PAYLOAD_FUNCTION),
                PayloadTermQuery::new("category_en", Term::from_string("shoes"), PAYLOAD_FUNCTION),
            ],
            slop: 2,
            in_order: false,
            function: PAYLOAD_FUNCTION,
            boost: 1.0,
        });
    }

    #[test]
    fn test_phrase_on_other_field() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = phrase("category_fr", &["rouge", "chaussures"], 1);

        assert_eq!(rewrite(query.clone(), &payload_fields, 0.0), query);
    }

    #[test]
    fn test_empty_phrase_is_unchanged() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = Query::Phrase {
            terms: vec![],
            slop: 0,
            in_order: true,
            boost: 2.0,
        };

        assert_eq!(rewrite(query.clone(), &payload_fields, 0.0), query);
    }

    #[test]
    fn test_phrase_gated_by_first_term_field() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = Query::Phrase {
            terms: vec![
                FieldTerm::new("category_en", Term::from_string("red")),
                FieldTerm::new("category_fr", Term::from_string("chaussures")),
            ],
            slop: 0,
            in_order: true,
            boost: 1.0,
        };

        match rewrite(query, &payload_fields, 0.0) {
            Query::PayloadNear{clauses, ..} => {
                assert_eq!(clauses.len(), 2);
                assert_eq!(clauses[1].field, "category_fr");
            }
            query => panic!("expected a payload near query, got {:?}", query),
        }
    }

    #[test]
    fn test_disjunction_max_takes_callers_tie_breaker() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = Query::new_disjunction_max(vec![
            term("category_en", "shoes").with_boost(4.0),
            term("category_fr", "chaussures"),
        ], 0.3);

        let rewritten = rewrite(query, &payload_fields, 0.7);

        assert_eq!(rewritten, Query::new_disjunction_max(vec![
            Query::new_payload_term("category_en", Term::from_string("shoes"), PAYLOAD_FUNCTION).with_boost(4.0),
            term("category_fr", "chaussures"),
        ], 0.7));
    }

    #[test]
    fn test_empty_disjunction_max() {
        let payload_fields = hashset!{"category_en".to_string()};

        let query = rewrite(Query::new_disjunction_max(vec![], 0.3), &payload_fields, 0.7);

        assert_eq!(query, Query::new_disjunction_max(vec![], 0.7));
    }

    #[test]
    fn test_boolean_clauses_preserved() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = Query::new_boolean(vec![
            BooleanClause::new(term("category_en", "red"), Occur::Must),
            BooleanClause::new(term("category_fr", "rouge"), Occur::Should),
        ]).with_minimum_should_match(1);

        let rewritten = rewrite(query, &payload_fields, 0.0);

        assert_eq!(rewritten, Query::new_boolean(vec![
            BooleanClause::new(Query::new_payload_term("category_en", Term::from_string("red"), PAYLOAD_FUNCTION), Occur::Must),
            BooleanClause::new(term("category_fr", "rouge"), Occur::Should),
        ]).with_minimum_should_match(1));
    }

    #[test]
    fn test_nested_boolean_inside_disjunction_max() {
        let payload_fields = hashset!{"category_en".to_string()};
        let query = Query::new_disjunction_max(vec![
            Query::new_boolean(vec![
                BooleanClause::new(term("category_en", "red"), Occur::Should),
                BooleanClause::new(term("category_en", "shoes"), Occur::Should),
            ]).with_boost(2.0),
        ], 0.0);

        match rewrite(query, &payload_fields, 0.1) {
            Query::DisjunctionMax{queries, tie_breaker, ..} => {
                assert_eq!(tie_breaker, 0.1);
                assert_eq!(queries[0].boost(), 2.0);

                match queries[0] {
                    Query::Boolean{ref clauses, ..} => {
                        for clause in clauses.iter() {
                            match clause.query {
                                Query::PayloadTerm{..} => (),
                                ref query => panic!("expected a payload term query, got {:?}", query),
                            }
                        }
                    }
                    ref query => panic!("expected a boolean query, got {:?}", query),
                }
            }
            query => panic!("expected a disjunction max query, got {:?}", query),
        }
    }

    #[test]
    fn test_rewriter_accessors() {
        let payload_fields = hashset!{"category_en".to_string()};
        let rewriter = PayloadQueryRewriter::new(&payload_fields, 0.4);

        assert!(rewriter.payload_fields().contains("category_en"));
        assert_eq!(rewriter.tie_breaker(), 0.4);
    }
}
