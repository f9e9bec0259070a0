//! Splits strings by word boundaries, according to the Unicode Standard [Annex #29](http://unicode.org/reports/tr29/) rules

use unicode_segmentation::{UnicodeSegmentation, UnicodeWords};

use crate::term::Term;
use crate::token::Token;


pub struct StandardTokenizer<'a> {
    unicode_words: UnicodeWords<'a>,
    position_counter: u32,
}


impl<'a> StandardTokenizer<'a> {
    pub fn new(input: &'a str) -> StandardTokenizer<'a> {
        StandardTokenizer {
            unicode_words: input.unicode_words(),
            position_counter: 0,
        }
    }
}


impl<'a> Iterator for StandardTokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.unicode_words.next() {
            Some(word) => {
                self.position_counter += 1;

                Some(Token::new(Term::from_string(word), self.position_counter))
            }
            None => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::token::Token;

    use super::StandardTokenizer;

    #[test]
    fn test_standard_tokenizer() {
        let tokenizer = StandardTokenizer::new("Red shoes, on sale!");
        let tokens = tokenizer.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::new(Term::from_string("Red"), 1),
            Token::new(Term::from_string("shoes"), 2),
            Token::new(Term::from_string("on"), 3),
            Token::new(Term::from_string("sale"), 4),
        ]);
    }

    #[test]
    fn test_standard_tokenizer_drops_escapes() {
        let tokenizer = StandardTokenizer::new("\\(red\\)");
        let tokens = tokenizer.collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token::new(Term::from_string("red"), 1),
        ]);
    }
}
