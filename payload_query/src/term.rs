use std::fmt;
use std::str;


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Term(Vec<u8>);


impl Term {
    pub fn from_string(string: &str) -> Term {
        Term(string.as_bytes().to_vec())
    }

    pub fn from_bytes(bytes: &[u8]) -> Term {
        Term(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }
}


impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(string) => write!(f, "{}", string),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}
