pub mod payload_rewriter;
pub mod scoring;
mod spans;

use std::fmt;

use crate::term::Term;
use crate::payload::PayloadFunction;


/// A term on a specific field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTerm {
    pub field: String,
    pub term: Term,
}


impl FieldTerm {
    pub fn new(field: &str, term: Term) -> FieldTerm {
        FieldTerm {
            field: field.to_owned(),
            term: term,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Must,
    Should,
    MustNot,
}


#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    pub query: Query,
    pub occur: Occur,
}


impl BooleanClause {
    pub fn new(query: Query, occur: Occur) -> BooleanClause {
        BooleanClause {
            query: query,
            occur: occur,
        }
    }
}


/// A term whose occurrences score with their payloads
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadTermQuery {
    pub field: String,
    pub term: Term,
    pub function: PayloadFunction,
}


impl PayloadTermQuery {
    pub fn new(field: &str, term: Term, function: PayloadFunction) -> PayloadTermQuery {
        PayloadTermQuery {
            field: field.to_owned(),
            term: term,
            function: function,
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    MatchAll {
        boost: f64,
    },
    MatchNone,
    Term {
        field: String,
        term: Term,
        boost: f64,
    },
    Prefix {
        field: String,
        prefix: String,
        boost: f64,
    },
    Phrase {
        terms: Vec<FieldTerm>,
        slop: u32,
        in_order: bool,
        boost: f64,
    },
    DisjunctionMax {
        queries: Vec<Query>,
        tie_breaker: f64,
        boost: f64,
    },
    Boolean {
        clauses: Vec<BooleanClause>,
        minimum_should_match: u32,
        boost: f64,
    },
    PayloadTerm {
        query: PayloadTermQuery,
        boost: f64,
    },
    PayloadNear {
        clauses: Vec<PayloadTermQuery>,
        slop: u32,
        in_order: bool,
        function: PayloadFunction,
        boost: f64,
    },
}


impl Query {
    pub fn new_match_all() -> Query {
        Query::MatchAll {
            boost: 1.0f64,
        }
    }

    pub fn new_term(field: &str, term: Term) -> Query {
        Query::Term {
            field: field.to_owned(),
            term: term,
            boost: 1.0f64,
        }
    }

    pub fn new_prefix(field: &str, prefix: &str) -> Query {
        Query::Prefix {
            field: field.to_owned(),
            prefix: prefix.to_owned(),
            boost: 1.0f64,
        }
    }

    /// Builds an ordered phrase where every term is on the same field
    pub fn new_phrase(field: &str, terms: Vec<Term>, slop: u32) -> Query {
        Query::Phrase {
            terms: terms.into_iter().map(|term| FieldTerm::new(field, term)).collect(),
            slop: slop,
            in_order: true,
            boost: 1.0f64,
        }
    }

    pub fn new_disjunction_max(queries: Vec<Query>, tie_breaker: f64) -> Query {
        Query::DisjunctionMax {
            queries: queries,
            tie_breaker: tie_breaker,
            boost: 1.0f64,
        }
    }

    pub fn new_boolean(clauses: Vec<BooleanClause>) -> Query {
        Query::Boolean {
            clauses: clauses,
            minimum_should_match: 0,
            boost: 1.0f64,
        }
    }

    pub fn new_payload_term(field: &str, term: Term, function: PayloadFunction) -> Query {
        Query::PayloadTerm {
            query: PayloadTermQuery::new(field, term, function),
            boost: 1.0f64,
        }
    }

    /// The boost multiplier of this node. `MatchNone` never scores so it is always 1.0
    pub fn boost(&self) -> f64 {
        match *self {
            Query::MatchNone => 1.0f64,
            Query::MatchAll{boost}
            | Query::Term{boost, ..}
            | Query::Prefix{boost, ..}
            | Query::Phrase{boost, ..}
            | Query::DisjunctionMax{boost, ..}
            | Query::Boolean{boost, ..}
            | Query::PayloadTerm{boost, ..}
            | Query::PayloadNear{boost, ..} => boost,
        }
    }

    pub fn set_boost(&mut self, new_boost: f64) {
        match *self {
            Query::MatchNone => (),
            Query::MatchAll{ref mut boost}
            | Query::Term{ref mut boost, ..}
            | Query::Prefix{ref mut boost, ..}
            | Query::Phrase{ref mut boost, ..}
            | Query::DisjunctionMax{ref mut boost, ..}
            | Query::Boolean{ref mut boost, ..}
            | Query::PayloadTerm{ref mut boost, ..}
            | Query::PayloadNear{ref mut boost, ..} => {
                *boost = new_boost;
            }
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Query {
        self.set_boost(boost);
        self
    }

    /// Sets the minimum number of SHOULD clauses that must match. Has no effect on other queries
    pub fn with_minimum_should_match(mut self, count: u32) -> Query {
        if let Query::Boolean{ref mut minimum_should_match, ..} = self {
            *minimum_should_match = count;
        }

        self
    }
}


fn write_boost(f: &mut fmt::Formatter, boost: f64) -> fmt::Result {
    if boost != 1.0f64 {
        write!(f, "^{}", boost)?;
    }

    Ok(())
}


fn write_terms(f: &mut fmt::Formatter, terms: &[&Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", term)?;
    }

    Ok(())
}


/// Renders the query in the Lucene-like syntax used in debug output
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Query::MatchAll{boost} => {
                write!(f, "*:*")?;
                write_boost(f, boost)
            }
            Query::MatchNone => write!(f, "MatchNone"),
            Query::Term{ref field, ref term, boost} => {
                write!(f, "{}:{}", field, term)?;
                write_boost(f, boost)
            }
            Query::Prefix{ref field, ref prefix, boost} => {
                write!(f, "{}:{}*", field, prefix)?;
                write_boost(f, boost)
            }
            Query::Phrase{ref terms, slop, boost, ..} => {
                if let Some(first) = terms.first() {
                    write!(f, "{}:", first.field)?;
                }
                write!(f, "\"")?;
                write_terms(f, &terms.iter().map(|field_term| &field_term.term).collect::<Vec<_>>())?;
                write!(f, "\"")?;
                if slop > 0 {
                    write!(f, "~{}", slop)?;
                }
                write_boost(f, boost)
            }
            Query::DisjunctionMax{ref queries, tie_breaker, boost} => {
                write!(f, "(")?;
                for (i, query) in queries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", query)?;
                }
                write!(f, ")")?;
                if tie_breaker != 0.0f64 {
                    write!(f, "~{}", tie_breaker)?;
                }
                write_boost(f, boost)
            }
            Query::Boolean{ref clauses, minimum_should_match, boost} => {
                let nested = boost != 1.0f64 || minimum_should_match > 0;
                if nested {
                    write!(f, "(")?;
                }
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match clause.occur {
                        Occur::Must => write!(f, "+")?,
                        Occur::MustNot => write!(f, "-")?,
                        Occur::Should => (),
                    }
                    match clause.query {
                        Query::Boolean{..} => write!(f, "({})", clause.query)?,
                        _ => write!(f, "{}", clause.query)?,
                    }
                }
                if nested {
                    write!(f, ")")?;
                }
                if minimum_should_match > 0 {
                    write!(f, "~{}", minimum_should_match)?;
                }
                write_boost(f, boost)
            }
            Query::PayloadTerm{ref query, boost} => {
                write!(f, "payloadTerm({}:{}, {})", query.field, query.term, query.function.name())?;
                write_boost(f, boost)
            }
            Query::PayloadNear{ref clauses, slop, in_order, function, boost} => {
                write!(f, "payloadNear([")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}:{}", clause.field, clause.term)?;
                }
                write!(f, "], {}, {}, {})", slop, in_order, function.name())?;
                write_boost(f, boost)
            }
        }
    }
}
