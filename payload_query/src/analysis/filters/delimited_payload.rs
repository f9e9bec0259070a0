//! Reads a float weight off the end of each token and stores it as the token's payload
//!
//! `shoes|3.5` becomes the token `shoes` carrying the payload `encode_float(3.5)`.
//! Tokens without the delimiter pass through untouched.

use std::str;

use crate::term::Term;
use crate::token::Token;
use crate::payload::encode_float;


pub struct DelimitedPayloadFilter<'a> {
    tokens: Box<dyn Iterator<Item=Token> + 'a>,
    delimiter: char,
}


impl<'a> DelimitedPayloadFilter<'a> {
    pub fn new(tokens: Box<dyn Iterator<Item=Token> + 'a>, delimiter: char) -> DelimitedPayloadFilter<'a> {
        DelimitedPayloadFilter {
            tokens: tokens,
            delimiter: delimiter,
        }
    }
}


impl<'a> Iterator for DelimitedPayloadFilter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.next()?;

        let (text, weight) = match str::from_utf8(token.term.as_bytes()) {
            Ok(string) => {
                match string.find(self.delimiter) {
                    Some(index) => {
                        let weight = &string[index + self.delimiter.len_utf8()..];
                        (string[..index].to_owned(), weight.to_owned())
                    }
                    None => return Some(token),
                }
            }
            Err(_) => return Some(token),
        };

        let payload = match weight.parse::<f32>() {
            Ok(weight) => encode_float(weight),
            Err(_) => {
                warn!("ignoring unparseable payload {:?} on token {:?}", weight, text);
                Vec::new()
            }
        };

        Some(Token {
            term: Term::from_string(&text),
            position: token.position,
            payload: payload,
        })
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;
    use crate::payload::encode_float;

    use super::DelimitedPayloadFilter;

    #[test]
    fn test_delimited_payload_filter() {
        let tokens = vec![
            Token::new(Term::from_string("red|2.5"), 1),
            Token::new(Term::from_string("shoes"), 2),
        ];

        let token_filter = DelimitedPayloadFilter::new(Box::new(tokens.into_iter()), '|');
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::with_payload(Term::from_string("red"), 1, encode_float(2.5)),
            Token::new(Term::from_string("shoes"), 2),
        ]);
    }

    #[test]
    fn test_unparseable_weight_is_dropped() {
        let tokens = vec![
            Token::new(Term::from_string("red|heavy"), 1),
        ];

        let token_filter = DelimitedPayloadFilter::new(Box::new(tokens.into_iter()), '|');
        let tokens = token_filter.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::new(Term::from_string("red"), 1),
        ]);
    }
}
