//! Parses the fielded query syntax accepted by `q.alt` and `bq`
//!
//! Clauses are separated by whitespace and may start with `+` or `-`:
//!
//!  - `*:*` matches everything
//!  - `field:value` is analysed with the field's search analyzer
//!  - `field:"a phrase"~2` is a phrase with optional slop
//!  - `field:pre*` is a prefix
//!
//! Any clause may end with `^boost`.

use payload_query::{Term, Token, Query, BooleanClause, Occur};

use crate::mapping::Mapping;
use crate::query_parser::SyntaxError;


/// Splits on whitespace outside of quotes
fn split_clauses(text: &str) -> Result<Vec<String>, SyntaxError> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    clauses.push(current);
                    current = String::new();
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(SyntaxError::new(format!("unterminated quote in {:?}", text)));
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    Ok(clauses)
}


/// Byte index of the first (or with `from_end`, the last) `target` that is not escaped or quoted
fn find_unescaped(text: &str, target: char, from_end: bool) -> Option<usize> {
    let mut found = None;
    let mut escaped = false;
    let mut in_quotes = false;

    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            c if c == target && !in_quotes => {
                found = Some(index);
                if !from_end {
                    break;
                }
            }
            '"' => in_quotes = !in_quotes,
            _ => {}
        }
    }

    found
}


fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                unescaped.push(escaped);
            }
        } else {
            unescaped.push(c);
        }
    }

    unescaped
}


pub struct FieldQueryParser<'a> {
    mapping: &'a Mapping,
}


impl<'a> FieldQueryParser<'a> {
    pub fn new(mapping: &'a Mapping) -> FieldQueryParser<'a> {
        FieldQueryParser {
            mapping: mapping,
        }
    }

    fn analyze(&self, field_name: &str, text: &str) -> Vec<Term> {
        let analyzer = self.mapping.get_field(field_name).search_analyzer();
        analyzer.initialise(text).map(|token: Token| token.term).collect()
    }

    fn parse_phrase(&self, field_name: &str, value: &str) -> Result<Option<Query>, SyntaxError> {
        // value starts with a quote, find the one that closes it
        let closing_quote = match find_unescaped(&value[1..], '"', false) {
            Some(index) => index + 1,
            None => return Err(SyntaxError::new(format!("unterminated phrase in {:?}", value))),
        };

        let phrase = unescape(&value[1..closing_quote]);
        let suffix = &value[closing_quote + 1..];

        let slop = if suffix.is_empty() {
            0
        } else if let Some(slop) = suffix.strip_prefix('~') {
            match slop.parse::<u32>() {
                Ok(slop) => slop,
                Err(_) => return Err(SyntaxError::new(format!("expected a slop after '~' in {:?}", value))),
            }
        } else {
            return Err(SyntaxError::new(format!("unexpected {:?} after phrase", suffix)));
        };

        let mut terms = self.analyze(field_name, &phrase);
        Ok(match terms.len() {
            0 => None,
            1 => Some(Query::new_term(field_name, terms.remove(0))),
            _ => Some(Query::new_phrase(field_name, terms, slop)),
        })
    }

    fn parse_value(&self, field_name: &str, value: &str) -> Result<Option<Query>, SyntaxError> {
        if value.starts_with('"') {
            return self.parse_phrase(field_name, value);
        }

        if value.len() > 1 && value.ends_with('*') && !value.ends_with("\\*") {
            let prefix = unescape(&value[..value.len() - 1]).to_lowercase();
            return Ok(Some(Query::new_prefix(field_name, &prefix)));
        }

        let mut terms = self.analyze(field_name, &unescape(value));
        Ok(match terms.len() {
            0 => None,
            1 => Some(Query::new_term(field_name, terms.remove(0))),
            _ => {
                let clauses = terms.into_iter().map(|term| {
                    BooleanClause::new(Query::new_term(field_name, term), Occur::Should)
                }).collect();

                Some(Query::new_boolean(clauses))
            }
        })
    }

    fn parse_clause(&self, clause: &str) -> Result<Option<BooleanClause>, SyntaxError> {
        let (occur, body) = if let Some(body) = clause.strip_prefix('+') {
            (Occur::Must, body)
        } else if let Some(body) = clause.strip_prefix('-') {
            (Occur::MustNot, body)
        } else {
            (Occur::Should, clause)
        };

        let (body, boost) = match find_unescaped(body, '^', true) {
            Some(index) => {
                let boost = &body[index + 1..];
                match boost.parse::<f64>() {
                    Ok(boost) => (&body[..index], Some(boost)),
                    Err(_) => return Err(SyntaxError::new(format!("expected a boost after '^' in {:?}", clause))),
                }
            }
            None => (body, None),
        };

        let query = if body == "*:*" {
            Some(Query::new_match_all())
        } else {
            let colon = match find_unescaped(body, ':', false) {
                Some(colon) => colon,
                None => return Err(SyntaxError::new(format!("expected field:value, got {:?}", clause))),
            };

            let field_name = unescape(&body[..colon]);
            let value = &body[colon + 1..];
            if field_name.is_empty() || value.is_empty() {
                return Err(SyntaxError::new(format!("expected field:value, got {:?}", clause)));
            }

            self.parse_value(&field_name, value)?
        };

        Ok(query.map(|query| {
            let query = match boost {
                Some(boost) => query.with_boost(boost),
                None => query,
            };

            BooleanClause::new(query, occur)
        }))
    }

    /// Parses a fielded query. Returns `None` if no clause produced a query
    pub fn parse(&self, text: &str) -> Result<Option<Query>, SyntaxError> {
        let mut clauses = Vec::new();
        for clause in split_clauses(text)? {
            if let Some(clause) = self.parse_clause(&clause)? {
                clauses.push(clause);
            }
        }

        if clauses.is_empty() {
            return Ok(None);
        }

        if clauses.len() == 1 && clauses[0].occur == Occur::Should {
            return Ok(clauses.pop().map(|clause| clause.query));
        }

        Ok(Some(Query::new_boolean(clauses)))
    }
}
