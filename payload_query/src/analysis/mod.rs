//! The analysis module
//!
//! Breaks a string of text down into Tokens. Tokenizers split the text into a
//! stream of tokens and filters transform that stream. An analyzer is a tokenizer
//! followed by a list of filters.

pub mod tokenizers;
pub mod filters;

use crate::token::Token;

use self::tokenizers::TokenizerSpec;
use self::filters::FilterSpec;


/// Defines an analyzer
///
/// # Examples
///
/// ```
/// use payload_query::{Term, Token};
/// use payload_query::analysis::AnalyzerSpec;
/// use payload_query::analysis::tokenizers::TokenizerSpec;
/// use payload_query::analysis::filters::FilterSpec;
///
/// let analyzer = AnalyzerSpec {
///     tokenizer: TokenizerSpec::Standard,
///     filters: vec![
///         FilterSpec::Lowercase,
///     ]
/// };
///
/// let tokens = analyzer.initialise("Hello, WORLD!").collect::<Vec<Token>>();
///
/// assert_eq!(tokens, vec![
///     Token::new(Term::from_string("hello"), 1),
///     Token::new(Term::from_string("world"), 2),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSpec {
    pub tokenizer: TokenizerSpec,
    pub filters: Vec<FilterSpec>,
}


impl AnalyzerSpec {
    pub fn initialise<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item=Token> + 'a> {
        let mut analyzer = self.tokenizer.initialise(input);

        for filter in self.filters.iter() {
            analyzer = filter.initialise(analyzer);
        }

        analyzer
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;
    use crate::payload::encode_float;

    use super::AnalyzerSpec;
    use super::tokenizers::TokenizerSpec;
    use super::filters::FilterSpec;

    #[test]
    fn test_keyword_payload_analyzer() {
        let analyzer = AnalyzerSpec {
            tokenizer: TokenizerSpec::Keyword,
            filters: vec![
                FilterSpec::DelimitedPayload { delimiter: '|' },
                FilterSpec::Lowercase,
            ]
        };

        let tokens = analyzer.initialise("Red Shoes|3.5").collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::with_payload(Term::from_string("red shoes"), 1, encode_float(3.5)),
        ]);
    }

    #[test]
    fn test_whitespace_payload_analyzer() {
        let analyzer = AnalyzerSpec {
            tokenizer: TokenizerSpec::Whitespace,
            filters: vec![
                FilterSpec::DelimitedPayload { delimiter: '|' },
                FilterSpec::Lowercase,
            ]
        };

        let tokens = analyzer.initialise("Red|2.0 shoes|0.5 sale").collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::with_payload(Term::from_string("red"), 1, encode_float(2.0)),
            Token::with_payload(Term::from_string("shoes"), 2, encode_float(0.5)),
            Token::new(Term::from_string("sale"), 3),
        ]);
    }
}
