//! Emits the whole input, trimmed, as a single token

use crate::term::Term;
use crate::token::Token;


pub struct KeywordTokenizer<'a> {
    input: Option<&'a str>,
}


impl<'a> KeywordTokenizer<'a> {
    pub fn new(input: &'a str) -> KeywordTokenizer<'a> {
        let input = input.trim();

        KeywordTokenizer {
            input: if input.is_empty() { None } else { Some(input) },
        }
    }
}


impl<'a> Iterator for KeywordTokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.input.take().map(|input| Token::new(Term::from_string(input), 1))
    }
}
