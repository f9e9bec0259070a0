//! Reads documents to search from JSON
//!
//! The input is an array of objects like:
//!
//! ```json
//! [
//!     {"key": "boots", "fields": {"category_en": "shoes|0.5", "tags": ["sale|2.0", "winter"]}}
//! ]
//! ```
//!
//! Array values are indexed as separate values of the same field.

use payload_query::{Document, Token};
use serde_json::Value as Json;

use crate::mapping::Mapping;


/// Added between the positions of two values of one field so phrases can't match across them
pub const POSITION_INCREMENT_GAP: u32 = 100;


fn parse_field_values(field_name: &str, value: &Json) -> Result<Vec<String>, String> {
    match *value {
        Json::String(ref string) => Ok(vec![string.clone()]),
        Json::Array(ref array) => {
            let mut values = Vec::with_capacity(array.len());
            for item in array.iter() {
                match *item {
                    Json::String(ref string) => values.push(string.clone()),
                    Json::Null => {}
                    _ => return Err(format!("field '{}' must only contain strings", field_name)),
                }
            }

            Ok(values)
        }
        Json::Null => Ok(Vec::new()),
        _ => Err(format!("field '{}' must be a string or an array of strings", field_name)),
    }
}


fn analyze_field_values(mapping: &Mapping, field_name: &str, values: &[String]) -> Vec<Token> {
    let analyzer = mapping.get_field(field_name).index_analyzer();
    let mut tokens: Vec<Token> = Vec::new();
    let mut position_offset = 0;

    for value in values.iter() {
        for mut token in analyzer.initialise(value) {
            token.position += position_offset;
            tokens.push(token);
        }

        if let Some(last_token) = tokens.last() {
            position_offset = last_token.position + POSITION_INCREMENT_GAP;
        }
    }

    tokens
}


pub fn parse_document(mapping: &Mapping, json: &Json) -> Result<Document, String> {
    let object = json.as_object().ok_or("documents must be JSON objects".to_string())?;

    let key = match object.get("key") {
        Some(&Json::String(ref key)) => key.clone(),
        Some(&Json::Number(ref key)) => key.to_string(),
        _ => return Err("documents must have a string \"key\"".to_string()),
    };

    let mut doc = Document::new(key);

    if let Some(fields) = object.get("fields") {
        let fields = fields.as_object().ok_or(format!("\"fields\" of document '{}' must be an object", doc.key))?;

        for (field_name, value) in fields.iter() {
            let values = parse_field_values(field_name, value)?;
            doc.fields.insert(field_name.clone(), analyze_field_values(mapping, field_name, &values));
        }
    }

    Ok(doc)
}


pub fn parse_documents(mapping: &Mapping, data: &str) -> Result<Vec<Document>, String> {
    let json: Json = serde_json::from_str(data).map_err(|e| format!("invalid JSON: {}", e))?;

    match json {
        Json::Array(ref items) => items.iter().map(|item| parse_document(mapping, item)).collect(),
        _ => Err("expected an array of documents".to_string()),
    }
}
