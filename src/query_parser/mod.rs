//! Builds query trees from dismax request parameters

pub mod utils;
pub mod sanitize;
pub mod min_should_match;
pub mod dismax;
pub mod field_query;
pub mod payload_dismax;

use std::fmt;
use std::error::Error;


/// Malformed query text
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    message: String,
}


impl SyntaxError {
    pub fn new<S: Into<String>>(message: S) -> SyntaxError {
        SyntaxError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}


impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "syntax error: {}", self.message)
    }
}


impl Error for SyntaxError {}


/// A request parameter that couldn't be interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct ParamError {
    pub param: String,
    pub value: String,
    pub reason: String,
}


impl ParamError {
    pub fn new(param: &str, value: &str, reason: &str) -> ParamError {
        ParamError {
            param: param.to_owned(),
            value: value.to_owned(),
            reason: reason.to_owned(),
        }
    }
}


impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid value {:?} for parameter '{}': {}", self.value, self.param, self.reason)
    }
}


impl Error for ParamError {}


#[derive(Debug, Clone, PartialEq)]
pub enum QueryParseError {
    Syntax(SyntaxError),
    Param(ParamError),
}


impl From<SyntaxError> for QueryParseError {
    fn from(error: SyntaxError) -> QueryParseError {
        QueryParseError::Syntax(error)
    }
}


impl From<ParamError> for QueryParseError {
    fn from(error: ParamError) -> QueryParseError {
        QueryParseError::Param(error)
    }
}


impl fmt::Display for QueryParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QueryParseError::Syntax(ref error) => error.fmt(f),
            QueryParseError::Param(ref error) => error.fmt(f),
        }
    }
}


impl Error for QueryParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            QueryParseError::Syntax(ref error) => Some(error),
            QueryParseError::Param(ref error) => Some(error),
        }
    }
}
