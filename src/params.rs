//! Request parameters, as sent in a URL query string

use url::form_urlencoded;

use crate::query_parser::ParamError;


/// The user's free-text query
pub const Q: &'static str = "q";

/// Query used when `q` is missing or blank
pub const ALT_Q: &'static str = "q.alt";

/// Query fields with optional boosts (`title^2.0 body`)
pub const QF: &'static str = "qf";

/// Fallback query field when `qf` is not given
pub const DF: &'static str = "df";

/// Phrase boosting fields
pub const PF: &'static str = "pf";

/// Slop of the phrase boosting query
pub const PS: &'static str = "ps";

/// Slop of phrases quoted in the user's query
pub const QS: &'static str = "qs";

pub const TIE: &'static str = "tie";

/// Minimum should match
pub const MM: &'static str = "mm";

/// Boost queries, may be given more than once
pub const BQ: &'static str = "bq";

/// Payload fields, whitespace separated
pub const PLF: &'static str = "plf";


#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestParams {
    params: Vec<(String, String)>,
}


impl RequestParams {
    pub fn new() -> RequestParams {
        RequestParams::default()
    }

    /// Parses an `application/x-www-form-urlencoded` string like `q=red+shoes&qf=title`
    pub fn from_query_string(query_string: &str) -> RequestParams {
        let query_string = query_string.trim_start_matches('?');

        RequestParams {
            params: form_urlencoded::parse(query_string.as_bytes()).into_owned().collect(),
        }
    }

    pub fn with_param(mut self, name: &str, value: &str) -> RequestParams {
        self.params.push((name.to_owned(), value.to_owned()));
        self
    }

    /// The first value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter()
            .find(|&&(ref param, _)| param == name)
            .map(|&(_, ref value)| value.as_str())
    }

    /// Every value of a parameter, in request order
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.params.iter()
            .filter(|&&(ref param, _)| param == name)
            .map(|&(_, ref value)| value.as_str())
            .collect()
    }

    /// Parses a float parameter. Missing and blank values take the default
    pub fn get_float(&self, name: &str, default: f64) -> Result<f64, ParamError> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => {
                value.parse().map_err(|_| ParamError::new(name, value, "expected a number"))
            }
            _ => Ok(default),
        }
    }

    /// Parses a non-negative integer parameter. Missing and blank values take the default
    pub fn get_u32(&self, name: &str, default: u32) -> Result<u32, ParamError> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => {
                value.parse().map_err(|_| ParamError::new(name, value, "expected a non-negative integer"))
            }
            _ => Ok(default),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::RequestParams;

    #[test]
    fn test_from_query_string() {
        let params = RequestParams::from_query_string("q=red+shoes&qf=category_en%5E2.0+category_fr&bq=a&bq=b");

        assert_eq!(params.get("q"), Some("red shoes"));
        assert_eq!(params.get("qf"), Some("category_en^2.0 category_fr"));
        assert_eq!(params.get_all("bq"), vec!["a", "b"]);
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_leading_question_mark() {
        let params = RequestParams::from_query_string("?q=shoes");

        assert_eq!(params.get("q"), Some("shoes"));
    }

    #[test]
    fn test_get_float() {
        let params = RequestParams::new().with_param("tie", "0.1").with_param("blank", " ");

        assert_eq!(params.get_float("tie", 0.0), Ok(0.1));
        assert_eq!(params.get_float("blank", 0.5), Ok(0.5));
        assert_eq!(params.get_float("missing", 0.5), Ok(0.5));
    }

    #[test]
    fn test_get_float_invalid() {
        let params = RequestParams::new().with_param("tie", "lots");

        let error = params.get_float("tie", 0.0).unwrap_err();
        assert_eq!(error.param, "tie");
        assert_eq!(error.value, "lots");
    }

    #[test]
    fn test_get_u32() {
        let params = RequestParams::new().with_param("ps", "3").with_param("qs", "-1");

        assert_eq!(params.get_u32("ps", 0), Ok(3));
        assert!(params.get_u32("qs", 0).is_err());
        assert_eq!(params.get_u32("missing", 7), Ok(7));
    }
}
