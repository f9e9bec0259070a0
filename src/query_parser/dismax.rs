//! Parses sanitised free text into a tree of disjunction max queries, one per clause
//!
//! The text is split into clauses:
//!
//!  - `"a quoted phrase"`
//!  - `+word` (must match) and `-word` (must not match)
//!  - runs of plain words, which are kept together as one clause
//!
//! Each clause is analysed with every query field's search analyzer and becomes a
//! disjunction max over the per-field queries.

use payload_query::{Term, Token, Query, BooleanClause, Occur};

use crate::mapping::Mapping;
use crate::query_parser::min_should_match::MinShouldMatch;


#[derive(Debug, Clone, PartialEq)]
enum ClauseText {
    Words(String),
    Phrase(String),
}


#[derive(Debug, Clone, PartialEq)]
struct RawClause {
    occur: Occur,
    text: ClauseText,
}


/// Reads characters up to the first unescaped terminator, unescaping backslashes
fn read_until<I: Iterator<Item=char>>(chars: &mut ::std::iter::Peekable<I>, is_terminator: &dyn Fn(char) -> bool) -> String {
    let mut text = String::new();

    while let Some(&c) = chars.peek() {
        if is_terminator(c) {
            break;
        }

        chars.next();
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                text.push(escaped);
            }
        } else {
            text.push(c);
        }
    }

    text
}


fn split_clauses(text: &str) -> Vec<RawClause> {
    let mut clauses = Vec::new();
    let mut run: Vec<String> = Vec::new();
    let mut chars = text.chars().peekable();

    fn flush_run(run: &mut Vec<String>, clauses: &mut Vec<RawClause>) {
        if !run.is_empty() {
            clauses.push(RawClause {
                occur: Occur::Should,
                text: ClauseText::Words(run.join(" ")),
            });
            run.clear();
        }
    }

    loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }

        let mut occur = Occur::Should;
        match chars.peek() {
            Some(&'+') => {
                chars.next();
                occur = Occur::Must;
            }
            Some(&'-') => {
                chars.next();
                occur = Occur::MustNot;
            }
            Some(_) => {}
            None => break,
        }

        // An operator on its own applies to nothing
        if chars.peek().map_or(true, |c| c.is_whitespace()) {
            continue;
        }

        let clause_text = if chars.peek() == Some(&'"') {
            chars.next();
            let phrase = read_until(&mut chars, &|c| c == '"');
            chars.next();
            ClauseText::Phrase(phrase)
        } else {
            ClauseText::Words(read_until(&mut chars, &|c| c.is_whitespace() || c == '"'))
        };

        match (occur, clause_text) {
            (Occur::Should, ClauseText::Words(word)) => {
                if !word.is_empty() {
                    run.push(word);
                }
            }
            (occur, text) => {
                flush_run(&mut run, &mut clauses);
                clauses.push(RawClause {
                    occur: occur,
                    text: text,
                });
            }
        }
    }

    flush_run(&mut run, &mut clauses);
    clauses
}


#[derive(Debug, Clone)]
pub struct DisjunctionMaxQueryParser<'a> {
    field_boosts: &'a [(String, f64)],
    mapping: &'a Mapping,
    tie_breaker: f64,
    phrase_slop: u32,
    min_should_match: &'a MinShouldMatch,
}


impl<'a> DisjunctionMaxQueryParser<'a> {
    pub fn new(field_boosts: &'a [(String, f64)], mapping: &'a Mapping, tie_breaker: f64, phrase_slop: u32, min_should_match: &'a MinShouldMatch) -> DisjunctionMaxQueryParser<'a> {
        DisjunctionMaxQueryParser {
            field_boosts: field_boosts,
            mapping: mapping,
            tie_breaker: tie_breaker,
            phrase_slop: phrase_slop,
            min_should_match: min_should_match,
        }
    }

    fn build_field_query(&self, field_name: &str, boost: f64, text: &str, quoted: bool) -> Option<Query> {
        let analyzer = self.mapping.get_field(field_name).search_analyzer();
        let mut terms = analyzer.initialise(text).map(|token: Token| token.term).collect::<Vec<Term>>();

        let query = match terms.len() {
            0 => return None,
            1 => Query::new_term(field_name, terms.remove(0)),
            _ if quoted => Query::new_phrase(field_name, terms, self.phrase_slop),
            num_terms => {
                let clauses = terms.into_iter().map(|term| {
                    BooleanClause::new(Query::new_term(field_name, term), Occur::Should)
                }).collect();

                Query::new_boolean(clauses).with_minimum_should_match(self.min_should_match.calculate(num_terms as u32))
            }
        };

        Some(query.with_boost(boost))
    }

    fn build_clause_query(&self, text: &ClauseText) -> Option<Query> {
        let (text, quoted) = match *text {
            ClauseText::Words(ref text) => (text, false),
            ClauseText::Phrase(ref text) => (text, true),
        };

        let field_queries = self.field_boosts.iter().filter_map(|&(ref field_name, boost)| {
            self.build_field_query(field_name, boost, text, quoted)
        }).collect::<Vec<_>>();

        if field_queries.is_empty() {
            debug!("no query field produced a token for {:?}, dropping the clause", text);
            return None;
        }

        Some(Query::new_disjunction_max(field_queries, self.tie_breaker))
    }

    /// Returns `None` if no clause produced a query
    pub fn parse(&self, text: &str) -> Option<Query> {
        let mut clauses = split_clauses(text).iter().filter_map(|raw_clause| {
            self.build_clause_query(&raw_clause.text).map(|query| BooleanClause::new(query, raw_clause.occur))
        }).collect::<Vec<_>>();

        debug!("parsed {:?} into {} clauses", text, clauses.len());

        if clauses.is_empty() {
            return None;
        }

        if clauses.len() == 1 && clauses[0].occur == Occur::Should {
            return clauses.pop().map(|clause| clause.query);
        }

        let should_clauses = clauses.iter().filter(|clause| clause.occur == Occur::Should).count() as u32;
        let minimum_should_match = self.min_should_match.calculate(should_clauses);

        Some(Query::new_boolean(clauses).with_minimum_should_match(minimum_should_match))
    }
}


#[cfg(test)]
mod tests {
    use payload_query::{Term, Query, BooleanClause, Occur};

    use crate::mapping::{Mapping, FieldType};
    use crate::query_parser::min_should_match::MinShouldMatch;

    use super::{split_clauses, RawClause, ClauseText, DisjunctionMaxQueryParser};

    fn keyword_mapping() -> Mapping {
        Mapping::new()
            .with_field("category_en", FieldType::Keyword)
            .with_field("category_fr", FieldType::Keyword)
    }

    fn keyword_fields() -> Vec<(String, f64)> {
        vec![("category_en".to_string(), 1.0), ("category_fr".to_string(), 1.0)]
    }

    fn text_mapping() -> Mapping {
        Mapping::new().with_field("title", FieldType::Text)
    }

    fn text_fields() -> Vec<(String, f64)> {
        vec![("title".to_string(), 2.0)]
    }

    fn should(text: &str) -> RawClause {
        RawClause { occur: Occur::Should, text: ClauseText::Words(text.to_string()) }
    }

    #[test]
    fn test_split_word_run() {
        assert_eq!(split_clauses("  red  leather shoes "), vec![should("red leather shoes")]);
    }

    #[test]
    fn test_split_operators_and_phrases() {
        assert_eq!(split_clauses("cheap +red -\"blue suede\" shoes"), vec![
            should("cheap"),
            RawClause { occur: Occur::Must, text: ClauseText::Words("red".to_string()) },
            RawClause { occur: Occur::MustNot, text: ClauseText::Phrase("blue suede".to_string()) },
            should("shoes"),
        ]);
    }

    #[test]
    fn test_split_unescapes() {
        assert_eq!(split_clauses("a\\(b t-shirt"), vec![should("a(b t-shirt")]);
    }

    #[test]
    fn test_split_ignores_lone_operator() {
        assert_eq!(split_clauses("red + shoes"), vec![should("red shoes")]);
    }

    #[test]
    fn test_keyword_fields_run() {
        let mapping = keyword_mapping();
        let fields = keyword_fields();
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.1, 0, &mm);

        assert_eq!(parser.parse("Red Shoes"), Some(Query::new_disjunction_max(vec![
            Query::new_term("category_en", Term::from_string("red shoes")),
            Query::new_term("category_fr", Term::from_string("red shoes")),
        ], 0.1)));
    }

    #[test]
    fn test_text_field_run() {
        let mapping = text_mapping();
        let fields = text_fields();
        let mm = MinShouldMatch::Percentage(50);
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 0, &mm);

        assert_eq!(parser.parse("red shoes"), Some(Query::new_disjunction_max(vec![
            Query::new_boolean(vec![
                BooleanClause::new(Query::new_term("title", Term::from_string("red")), Occur::Should),
                BooleanClause::new(Query::new_term("title", Term::from_string("shoes")), Occur::Should),
            ]).with_minimum_should_match(1).with_boost(2.0),
        ], 0.0)));
    }

    #[test]
    fn test_quoted_phrase_uses_slop() {
        let mapping = text_mapping();
        let fields = text_fields();
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 3, &mm);

        assert_eq!(parser.parse("\"red shoes\""), Some(Query::new_disjunction_max(vec![
            Query::new_phrase("title", vec![Term::from_string("red"), Term::from_string("shoes")], 3).with_boost(2.0),
        ], 0.0)));
    }

    #[test]
    fn test_single_word_phrase_is_a_term() {
        let mapping = text_mapping();
        let fields = text_fields();
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 3, &mm);

        assert_eq!(parser.parse("\"shoes\""), Some(Query::new_disjunction_max(vec![
            Query::new_term("title", Term::from_string("shoes")).with_boost(2.0),
        ], 0.0)));
    }

    #[test]
    fn test_operators() {
        let mapping = text_mapping();
        let fields = text_fields();
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 0, &mm);

        let title = |text: &str| Query::new_disjunction_max(vec![
            Query::new_term("title", Term::from_string(text)).with_boost(2.0),
        ], 0.0);

        assert_eq!(parser.parse("+red -blue shoes"), Some(Query::new_boolean(vec![
            BooleanClause::new(title("red"), Occur::Must),
            BooleanClause::new(title("blue"), Occur::MustNot),
            BooleanClause::new(title("shoes"), Occur::Should),
        ]).with_minimum_should_match(1)));
    }

    #[test]
    fn test_clause_without_tokens_is_dropped() {
        let mapping = text_mapping();
        let fields = text_fields();
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 0, &mm);

        assert_eq!(parser.parse("\\!\\!\\!"), None);
        assert_eq!(parser.parse("   "), None);
    }

    #[test]
    fn test_no_fields() {
        let mapping = text_mapping();
        let fields: Vec<(String, f64)> = vec![];
        let mm = MinShouldMatch::default();
        let parser = DisjunctionMaxQueryParser::new(&fields, &mapping, 0.0, 0, &mm);

        assert_eq!(parser.parse("shoes"), None);
    }
}
