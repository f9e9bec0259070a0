pub mod memory;

use crate::term::Term;

pub use self::memory::MemoryIndex;


/// Index-wide statistics needed to score a document
pub trait IndexReader {
    fn num_docs(&self) -> u64;
    fn term_doc_freq(&self, field_name: &str, term: &Term) -> u64;
    fn total_tokens(&self, field_name: &str) -> u64;
}
