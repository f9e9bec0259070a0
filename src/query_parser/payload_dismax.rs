//! Dismax query parser that scores terms from payload fields with their payloads
//!
//! Takes the usual dismax parameters (`q`, `q.alt`, `qf`, `pf`, `ps`, `qs`, `tie`,
//! `mm`, `bq`) plus `plf`, a whitespace separated list of payload fields. The main
//! query is parsed as plain dismax and then rewritten so that terms and phrases on
//! payload fields score with the payloads stored against them.

use std::collections::HashSet;

use serde_json::Value as Json;
use payload_query::{Query, BooleanClause, Occur, PayloadQueryRewriter};

use crate::params::{self, RequestParams};
use crate::mapping::Mapping;
use crate::debug::DebugInfo;
use crate::query_parser::{QueryParseError, SyntaxError};
use crate::query_parser::utils::{parse_field_boosts, parse_payload_fields};
use crate::query_parser::sanitize::sanitize;
use crate::query_parser::min_should_match::MinShouldMatch;
use crate::query_parser::dismax::DisjunctionMaxQueryParser;
use crate::query_parser::field_query::FieldQueryParser;


pub const PARSER_NAME: &'static str = "PayloadDisMaxQParser";


#[derive(Debug)]
pub struct PayloadDisMaxQParser<'a> {
    params: &'a RequestParams,
    mapping: &'a Mapping,
    payload_fields: HashSet<String>,
    tie_breaker: f64,
    parsed_user_query: Option<Query>,
    alt_user_query: Option<Query>,
    boost_params: Vec<String>,
    boost_queries: Vec<Query>,
}


impl<'a> PayloadDisMaxQParser<'a> {
    pub fn new(params: &'a RequestParams, mapping: &'a Mapping) -> PayloadDisMaxQParser<'a> {
        PayloadDisMaxQParser {
            params: params,
            mapping: mapping,
            payload_fields: parse_payload_fields(params.get(params::PLF)),
            tie_breaker: 0.0f64,
            parsed_user_query: None,
            alt_user_query: None,
            boost_params: Vec::new(),
            boost_queries: Vec::new(),
        }
    }

    pub fn payload_fields(&self) -> &HashSet<String> {
        &self.payload_fields
    }

    /// The user's query as parsed, before the payload rewrite
    pub fn parsed_user_query(&self) -> Option<&Query> {
        self.parsed_user_query.as_ref()
    }

    fn non_blank_param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).filter(|value| !value.trim().is_empty())
    }

    fn query_fields(&self) -> Result<Vec<(String, f64)>, QueryParseError> {
        let query_fields = parse_field_boosts(params::QF, &self.params.get_all(params::QF))?;
        if !query_fields.is_empty() {
            return Ok(query_fields);
        }

        match self.non_blank_param(params::DF) {
            Some(default_field) => Ok(vec![(default_field.trim().to_owned(), 1.0f64)]),
            None => Err(SyntaxError::new("neither qf nor df is set, there are no fields to search").into()),
        }
    }

    fn min_should_match(&self) -> Result<MinShouldMatch, QueryParseError> {
        match self.non_blank_param(params::MM) {
            Some(spec) => Ok(MinShouldMatch::parse(spec)?),
            None => Ok(MinShouldMatch::default()),
        }
    }

    fn parse_alternate_query(&mut self) -> Result<Option<Query>, QueryParseError> {
        let alt_query_string = match self.non_blank_param(params::ALT_Q) {
            Some(alt_query_string) => alt_query_string,
            None => return Ok(None),
        };

        self.alt_user_query = FieldQueryParser::new(self.mapping).parse(alt_query_string)?;
        Ok(self.alt_user_query.clone())
    }

    fn parse_boost_queries(&mut self) -> Result<(), QueryParseError> {
        let parser = FieldQueryParser::new(self.mapping);

        for boost_param in self.params.get_all(params::BQ) {
            if boost_param.trim().is_empty() {
                continue;
            }

            self.boost_params.push(boost_param.to_owned());
            if let Some(boost_query) = parser.parse(boost_param)? {
                self.boost_queries.push(boost_query);
            }
        }

        Ok(())
    }

    /// Parses the request into a query
    ///
    /// Returns `Ok(None)` when there's nothing to search for: the user query is blank (or
    /// has no searchable words) and no alternate query is configured.
    pub fn parse(&mut self) -> Result<Option<Query>, QueryParseError> {
        let phrase_fields = parse_field_boosts(params::PF, &self.params.get_all(params::PF))?;
        self.tie_breaker = self.params.get_float(params::TIE, 0.0f64)?;
        let query_slop = self.params.get_u32(params::QS, 0)?;
        let phrase_slop = self.params.get_u32(params::PS, 0)?;
        let min_should_match = self.min_should_match()?;

        self.parsed_user_query = None;
        self.alt_user_query = None;
        self.boost_params.clear();
        self.boost_queries.clear();

        let mut clauses = Vec::new();

        let user_query = match self.non_blank_param(params::Q) {
            Some(user_query) => {
                let user_query = sanitize(user_query);
                let query_fields = self.query_fields()?;
                let parser = DisjunctionMaxQueryParser::new(&query_fields, self.mapping, self.tie_breaker, query_slop, &min_should_match);

                parser.parse(&user_query).map(|query| (user_query, query))
            }
            None => None,
        };

        match user_query {
            Some((user_query, parsed_user_query)) => {
                let rewriter = PayloadQueryRewriter::new(&self.payload_fields, self.tie_breaker);
                self.parsed_user_query = Some(parsed_user_query.clone());
                clauses.push(BooleanClause::new(rewriter.rewrite(parsed_user_query), Occur::Must));

                // Boost documents that have the whole query as a phrase
                if !phrase_fields.is_empty() {
                    let phrase_parser = DisjunctionMaxQueryParser::new(&phrase_fields, self.mapping, self.tie_breaker, phrase_slop, &min_should_match);
                    let phrase = format!("\"{}\"", user_query.replace('"', ""));

                    if let Some(phrase_query) = phrase_parser.parse(&phrase) {
                        clauses.push(BooleanClause::new(phrase_query, Occur::Should));
                    }
                }
            }
            None => {
                match self.parse_alternate_query()? {
                    Some(alt_user_query) => {
                        debug!("user query is empty, using the alternate query");
                        clauses.push(BooleanClause::new(alt_user_query, Occur::Must));
                    }
                    None => {
                        debug!("user query is empty and there is no alternate query");
                        return Ok(None);
                    }
                }
            }
        }

        self.parse_boost_queries()?;
        for boost_query in self.boost_queries.iter().cloned() {
            match boost_query {
                // Unboosted boolean queries are merged into the main query
                Query::Boolean{clauses: boost_clauses, minimum_should_match: 0, boost} if boost == 1.0f64 => {
                    clauses.extend(boost_clauses);
                }
                boost_query => {
                    clauses.push(BooleanClause::new(boost_query, Occur::Should));
                }
            }
        }

        Ok(Some(Query::new_boolean(clauses)))
    }

    /// Appends the dismax debug entries, then one `payloadField` entry per payload field
    pub fn add_debug_info(&self, debug_info: &mut DebugInfo) {
        debug_info.add("QParser", PARSER_NAME);
        debug_info.add("altquerystring", match self.alt_user_query {
            Some(ref query) => Json::String(query.to_string()),
            None => Json::Null,
        });

        if !self.boost_params.is_empty() {
            debug_info.add("boost_queries", self.boost_params.clone());
            debug_info.add("parsed_boost_queries", self.boost_queries.iter().map(|query| query.to_string()).collect::<Vec<_>>());
        }

        for field in self.payload_fields.iter() {
            debug_info.add("payloadField", field.as_str());
        }
    }
}
