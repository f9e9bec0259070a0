use std::collections::HashMap;

use crate::token::Token;


#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub fields: HashMap<String, Vec<Token>>,
}


impl Document {
    pub fn new(key: String) -> Document {
        Document {
            key: key,
            fields: HashMap::new(),
        }
    }

    /// Returns the tokens indexed for a field, or an empty slice if the document doesn't have it
    pub fn field_tokens(&self, field: &str) -> &[Token] {
        match self.fields.get(field) {
            Some(tokens) => tokens,
            None => &[],
        }
    }
}
