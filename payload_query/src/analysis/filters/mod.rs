pub mod lowercase;
pub mod delimited_payload;

use crate::token::Token;

use self::lowercase::LowercaseFilter;
use self::delimited_payload::DelimitedPayloadFilter;


/// Defines a token filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Lowercase,

    /// Splits `text<delimiter>weight` tokens into the text and an encoded float payload
    DelimitedPayload {
        delimiter: char,
    },
}


impl FilterSpec {
    pub fn initialise<'a>(&self, input: Box<dyn Iterator<Item=Token> + 'a>) -> Box<dyn Iterator<Item=Token> + 'a> {
        match *self {
            FilterSpec::Lowercase => {
                Box::new(LowercaseFilter::new(input))
            }
            FilterSpec::DelimitedPayload{delimiter} => {
                Box::new(DelimitedPayloadFilter::new(input, delimiter))
            }
        }
    }
}
