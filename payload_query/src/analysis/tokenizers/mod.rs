pub mod standard;
pub mod whitespace;
pub mod keyword;

use crate::token::Token;

use self::standard::StandardTokenizer;
use self::whitespace::WhitespaceTokenizer;
use self::keyword::KeywordTokenizer;


/// Defines a tokenizer
///
/// # Examples
///
/// ```
/// use payload_query::{Term, Token};
/// use payload_query::analysis::tokenizers::TokenizerSpec;
///
/// let tokens = TokenizerSpec::Whitespace.initialise("Hello, world!").collect::<Vec<Token>>();
///
/// assert_eq!(tokens, vec![
///     Token::new(Term::from_string("Hello,"), 1),
///     Token::new(Term::from_string("world!"), 2),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizerSpec {
    Standard,
    Whitespace,
    Keyword,
}


impl TokenizerSpec {
    pub fn initialise<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item=Token> + 'a> {
        match *self {
            TokenizerSpec::Standard => {
                Box::new(StandardTokenizer::new(input))
            }
            TokenizerSpec::Whitespace => {
                Box::new(WhitespaceTokenizer::new(input))
            }
            TokenizerSpec::Keyword => {
                Box::new(KeywordTokenizer::new(input))
            }
        }
    }
}
