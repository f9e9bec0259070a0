//! Converts each token into lowercase

use std::str;

use crate::term::Term;
use crate::token::Token;


pub struct LowercaseFilter<'a> {
    tokens: Box<dyn Iterator<Item=Token> + 'a>,
}


impl<'a> LowercaseFilter<'a> {
    pub fn new(tokens: Box<dyn Iterator<Item=Token> + 'a>) -> LowercaseFilter<'a> {
        LowercaseFilter {
            tokens: tokens,
        }
    }
}


impl<'a> Iterator for LowercaseFilter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.tokens.next() {
            Some(token) => {
                let term = match str::from_utf8(token.term.as_bytes()) {
                    Ok(string) => Term::from_string(&string.to_lowercase()),
                    Err(_) => token.term.clone(),
                };

                Some(Token {
                    term: term,
                    position: token.position,
                    payload: token.payload,
                })
            }
            None => None
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;

    use super::LowercaseFilter;

    #[test]
    fn test_lowercase_filter() {
        let tokens = vec![
            Token::new(Term::from_string("Hello"), 1),
            Token::with_payload(Term::from_string("WORLD"), 2, vec![1, 2, 3, 4]),
        ];

        let token_filter = LowercaseFilter::new(Box::new(tokens.into_iter()));
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::new(Term::from_string("hello"), 1),
            Token::with_payload(Term::from_string("world"), 2, vec![1, 2, 3, 4]),
        ]);
    }
}
