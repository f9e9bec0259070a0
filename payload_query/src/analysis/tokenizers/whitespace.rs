//! Splits strings on whitespace, keeping punctuation attached to the words

use std::str::SplitWhitespace;

use crate::term::Term;
use crate::token::Token;


pub struct WhitespaceTokenizer<'a> {
    words: SplitWhitespace<'a>,
    position_counter: u32,
}


impl<'a> WhitespaceTokenizer<'a> {
    pub fn new(input: &'a str) -> WhitespaceTokenizer<'a> {
        WhitespaceTokenizer {
            words: input.split_whitespace(),
            position_counter: 0,
        }
    }
}


impl<'a> Iterator for WhitespaceTokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let word = self.words.next()?;
        self.position_counter += 1;

        Some(Token::new(Term::from_string(word), self.position_counter))
    }
}
