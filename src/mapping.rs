use std::collections::HashMap;

use payload_query::analysis::AnalyzerSpec;
use payload_query::analysis::tokenizers::TokenizerSpec;
use payload_query::analysis::filters::FilterSpec;


/// Separates a token from its payload weight in indexed text (`shoes|3.5`)
pub const PAYLOAD_DELIMITER: char = '|';


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    /// The whole value is one token
    Keyword,

    /// Unicode word segmentation, no payloads
    Text,

    /// Whitespace separated tokens, each with an optional `|weight` payload
    DelimitedPayloads,
}


impl Default for FieldType {
    fn default() -> FieldType { FieldType::DelimitedPayloads }
}


#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMapping {
    pub data_type: FieldType,
}


impl FieldMapping {
    pub fn new(data_type: FieldType) -> FieldMapping {
        FieldMapping {
            data_type: data_type,
        }
    }

    /// Analyzer applied to document values
    pub fn index_analyzer(&self) -> AnalyzerSpec {
        match self.data_type {
            FieldType::Keyword => {
                AnalyzerSpec {
                    tokenizer: TokenizerSpec::Keyword,
                    filters: vec![
                        FilterSpec::DelimitedPayload { delimiter: PAYLOAD_DELIMITER },
                        FilterSpec::Lowercase,
                    ]
                }
            }
            FieldType::Text => self.search_analyzer(),
            FieldType::DelimitedPayloads => {
                AnalyzerSpec {
                    tokenizer: TokenizerSpec::Whitespace,
                    filters: vec![
                        FilterSpec::DelimitedPayload { delimiter: PAYLOAD_DELIMITER },
                        FilterSpec::Lowercase,
                    ]
                }
            }
        }
    }

    /// Analyzer applied to query text
    pub fn search_analyzer(&self) -> AnalyzerSpec {
        let tokenizer = match self.data_type {
            FieldType::Keyword => TokenizerSpec::Keyword,
            FieldType::Text => TokenizerSpec::Standard,
            FieldType::DelimitedPayloads => TokenizerSpec::Whitespace,
        };

        AnalyzerSpec {
            tokenizer: tokenizer,
            filters: vec![
                FilterSpec::Lowercase,
            ]
        }
    }
}


/// Field mappings by name. Unmapped fields use the default mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    fields: HashMap<String, FieldMapping>,
    default_field: FieldMapping,
}


impl Mapping {
    pub fn new() -> Mapping {
        Mapping::default()
    }

    pub fn with_field(mut self, name: &str, data_type: FieldType) -> Mapping {
        self.fields.insert(name.to_owned(), FieldMapping::new(data_type));
        self
    }

    pub fn get_field(&self, name: &str) -> &FieldMapping {
        self.fields.get(name).unwrap_or(&self.default_field)
    }
}
