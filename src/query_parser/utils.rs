use std::collections::HashSet;

use crate::query_parser::ParamError;


/// Parses `field` or `field^boost`
pub fn parse_field_and_boost(param: &str, string: &str) -> Result<(String, f64), ParamError> {
    match string.find('^') {
        Some(index) => {
            let field_name = &string[..index];
            let boost = &string[index + 1..];

            if field_name.is_empty() {
                return Err(ParamError::new(param, string, "expected a field name before '^'"));
            }

            match boost.parse::<f64>() {
                Ok(boost) => Ok((field_name.to_owned(), boost)),
                Err(_) => Err(ParamError::new(param, string, "expected a number after '^'")),
            }
        }
        None => Ok((string.to_owned(), 1.0f64)),
    }
}


/// Parses every value of a field list parameter like `qf=title^2 body`
///
/// Fields keep the order they were first given in. A field given twice takes the later boost.
pub fn parse_field_boosts(param: &str, values: &[&str]) -> Result<Vec<(String, f64)>, ParamError> {
    let mut field_boosts: Vec<(String, f64)> = Vec::new();

    for value in values.iter() {
        for field in value.split_whitespace() {
            let (field_name, boost) = parse_field_and_boost(param, field)?;

            match field_boosts.iter().position(|existing| existing.0 == field_name) {
                Some(index) => field_boosts[index].1 = boost,
                None => field_boosts.push((field_name, boost)),
            }
        }
    }

    Ok(field_boosts)
}


/// Parses the whitespace separated list of payload fields
pub fn parse_payload_fields(value: Option<&str>) -> HashSet<String> {
    match value {
        Some(value) => value.split_whitespace().map(|field| field.to_owned()).collect(),
        None => HashSet::new(),
    }
}
