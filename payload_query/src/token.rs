use crate::term::Term;


#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub term: Term,
    pub position: u32,

    /// Payload bytes attached to this occurrence. Empty when there is no payload.
    pub payload: Vec<u8>,
}


impl Token {
    pub fn new(term: Term, position: u32) -> Token {
        Token {
            term: term,
            position: position,
            payload: Vec::new(),
        }
    }

    pub fn with_payload(term: Term, position: u32, payload: Vec<u8>) -> Token {
        Token {
            term: term,
            position: position,
            payload: payload,
        }
    }

    #[inline]
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}
